//! Trend Forecaster
//!
//! Predicts next month's spend from the daily average and compares the most
//! recent window of transactions with the one before it:
//! - Expenses are ordered by timestamp first (stable, so ties keep input order)
//! - Both windows are `window_size` transactions wide; the older one may be short or empty

use crate::config::ForecastSettings;
use crate::models::Expense;

use super::stats::DAYS_PER_MONTH;
use super::types::{Confidence, Predictions, Stats, TrendDirection};

fn mean(amounts: &[&Expense]) -> f64 {
    let sum: f64 = amounts.iter().map(|e| e.amount).sum();
    sum / amounts.len().max(1) as f64
}

/// Split chronologically ordered expenses into (older, recent) windows
fn windows<'a>(sorted: &'a [&'a Expense], size: usize) -> (&'a [&'a Expense], &'a [&'a Expense]) {
    let recent_start = sorted.len().saturating_sub(size);
    let older_start = recent_start.saturating_sub(size);
    (&sorted[older_start..recent_start], &sorted[recent_start..])
}

/// Forecast spend and trend; None below the minimum transaction count
pub fn forecast_trend(
    expenses: &[Expense],
    stats: &Stats,
    monthly_income: f64,
    settings: &ForecastSettings,
) -> Option<Predictions> {
    if expenses.len() < settings.min_transactions {
        return None;
    }

    let predicted_monthly = (stats.total / stats.active_days.max(1) as f64) * DAYS_PER_MONTH;

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by_key(|e| e.occurred_at);

    let (older, recent) = windows(&sorted, settings.window_size);
    let recent_average = mean(recent);
    let older_average = mean(older);

    let raw_percent = if older_average > 0.0 {
        (recent_average - older_average).abs() / older_average * 100.0
    } else if recent_average > 0.0 {
        // Nothing to compare against; treated as a first signal
        100.0
    } else {
        0.0
    };
    let trend_percentage = raw_percent.min(settings.max_trend_percent);

    let trend = if recent_average > older_average {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let confidence = if expenses.len() > settings.high_confidence_count {
        Confidence::High
    } else {
        Confidence::Medium
    };

    let predicted_ratio = if monthly_income > 0.0 {
        predicted_monthly / monthly_income * 100.0
    } else {
        0.0
    };

    Some(Predictions {
        predicted_monthly,
        trend,
        trend_percentage,
        confidence,
        predicted_ratio,
        recent_average,
        older_average,
    })
}
