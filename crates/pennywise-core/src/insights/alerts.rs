//! Alert Generator
//!
//! Two groups of checks, evaluated in order and never deduplicated:
//! - Same-day spikes (today's spend vs. averages), always evaluated
//! - Income-relative limits, skipped entirely without declared income

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::config::AlertThresholds;
use crate::models::Expense;

use super::stats::{local_day, DAYS_PER_MONTH};
use super::types::{Alert, AlertType, Severity, Stats};

fn alert(
    alert_type: AlertType,
    severity: Severity,
    title: impl Into<String>,
    message: impl Into<String>,
    action: impl Into<String>,
) -> Alert {
    Alert {
        alert_type,
        severity,
        title: title.into(),
        message: message.into(),
        action: action.into(),
        category: None,
    }
}

fn same_day_alerts(
    expenses: &[Expense],
    stats: &Stats,
    today: NaiveDate,
    tz: &Tz,
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let todays: Vec<&Expense> = expenses
        .iter()
        .filter(|e| local_day(e, tz) == today)
        .collect();
    if todays.is_empty() {
        return alerts;
    }

    let today_total: f64 = todays.iter().map(|e| e.amount).sum();
    let daily_limit = thresholds.daily_spike_multiplier * stats.avg_per_transaction;
    if today_total > daily_limit {
        alerts.push(alert(
            AlertType::HighDailySpending,
            Severity::Warning,
            "High Spending Today",
            format!(
                "You've spent ${:.2} today, more than {:.0}x your average transaction of ${:.2}",
                today_total, thresholds.daily_spike_multiplier, stats.avg_per_transaction
            ),
            "Pause discretionary purchases for the rest of the day",
        ));
    }

    let active_days = stats.active_days.max(1) as f64;
    for entry in &stats.category_totals {
        let today_in_category: f64 = todays
            .iter()
            .filter(|e| e.category == entry.category)
            .map(|e| e.amount)
            .sum();
        let daily_average = entry.amount / active_days;
        if today_in_category > thresholds.category_spike_multiplier * daily_average {
            alerts.push(Alert {
                category: Some(entry.category),
                ..alert(
                    AlertType::UnusualCategorySpending,
                    Severity::Info,
                    format!("Unusual {} Spending", entry.category),
                    format!(
                        "Today's {} spending (${:.2}) is well above your daily average of ${:.2}",
                        entry.category.as_str().to_lowercase(),
                        today_in_category,
                        daily_average
                    ),
                    format!("Double-check today's {} purchases", entry.category.as_str().to_lowercase()),
                )
            });
        }
    }

    alerts
}

fn income_alerts(stats: &Stats, monthly_income: f64, thresholds: &AlertThresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if stats.expense_ratio > thresholds.overspending_ratio {
        alerts.push(alert(
            AlertType::Overspending,
            Severity::Critical,
            "Spending Exceeds Income",
            format!(
                "At this pace you'll spend ${:.2} this month, {:.0}% of your ${:.2} income",
                stats.monthly_expenses, stats.expense_ratio, monthly_income
            ),
            "Cut non-essential spending immediately and review recurring bills",
        ));
    } else if stats.expense_ratio > thresholds.high_spending_ratio {
        alerts.push(alert(
            AlertType::HighSpending,
            Severity::Warning,
            "High Spending",
            format!(
                "You're on track to spend {:.0}% of your income this month",
                stats.expense_ratio
            ),
            "Set weekly limits for your largest categories",
        ));
    }

    if stats.savings_rate < thresholds.low_savings_rate {
        alerts.push(alert(
            AlertType::LowSavings,
            Severity::Warning,
            "Low Savings Rate",
            format!(
                "You're saving {:.1}% of your income, below the {:.0}% minimum",
                stats.savings_rate, thresholds.low_savings_rate
            ),
            "Automate a transfer to savings on payday",
        ));
    }

    let scale = DAYS_PER_MONTH / stats.active_days.max(1) as f64;
    for entry in &stats.category_totals {
        let monthly = entry.amount * scale;
        let limit_share = thresholds.category_limits.get(entry.category);
        let limit = limit_share * monthly_income;
        if monthly > limit {
            alerts.push(Alert {
                category: Some(entry.category),
                ..alert(
                    AlertType::CategoryOverspending,
                    Severity::Info,
                    format!("{} Over Limit", entry.category),
                    format!(
                        "{} is heading for ${:.2} this month, above the {:.0}% (${:.2}) guideline",
                        entry.category,
                        monthly,
                        limit_share * 100.0,
                        limit
                    ),
                    format!("Trim {} spending to stay within budget", entry.category.as_str().to_lowercase()),
                )
            });
        }
    }

    alerts
}

/// Evaluate every alert rule against today's date in the analysis timezone
pub fn generate_alerts(
    expenses: &[Expense],
    stats: &Stats,
    monthly_income: f64,
    today: NaiveDate,
    tz: &Tz,
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let mut alerts = same_day_alerts(expenses, stats, today, tz, thresholds);

    if monthly_income > 0.0 {
        alerts.extend(income_alerts(stats, monthly_income, thresholds));
    }

    alerts
}
