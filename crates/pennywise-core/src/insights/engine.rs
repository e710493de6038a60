//! Insight Engine - composes the analysis components into one result

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::InsightsConfig;
use crate::error::{Error, Result};
use crate::models::Ledger;

use super::alerts::generate_alerts;
use super::budget::allocate_budget;
use super::forecast::forecast_trend;
use super::health::score_health;
use super::patterns::detect_patterns;
use super::stats::aggregate;
use super::tips::personalized_tips;
use super::types::Insights;

/// Per-invocation inputs that are not part of the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisContext {
    /// The local date treated as "today" for same-day alerts
    pub today: NaiveDate,
    /// Timezone used to bucket timestamps into days
    pub timezone: Tz,
    /// Seed for the general tip draw
    pub tip_seed: u64,
}

impl AnalysisContext {
    pub fn new(today: NaiveDate, timezone: Tz, tip_seed: u64) -> Self {
        Self {
            today,
            timezone,
            tip_seed,
        }
    }

    /// Context for the current moment in `timezone` with a random tip seed
    pub fn now(timezone: Tz) -> Self {
        let today = Utc::now().with_timezone(&timezone).date_naive();
        Self::new(today, timezone, rand::random())
    }
}

/// Parse an IANA timezone name; "utc" is accepted in any case
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("utc") {
        return Ok(chrono_tz::UTC);
    }
    name.parse::<Tz>()
        .map_err(|_| Error::InvalidData(format!("Unknown timezone: {}", name)))
}

/// Runs every component in dependency order against a ledger
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightsConfig,
}

impl InsightEngine {
    /// Engine with built-in thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Produce the full insight set; never fails on a validated ledger
    pub fn generate_insights(&self, ledger: &Ledger, ctx: &AnalysisContext) -> Insights {
        let tz = &ctx.timezone;
        let income = ledger.monthly_income;
        let expenses = &ledger.expenses;

        let stats = aggregate(expenses, &ledger.incomes, income, tz);
        tracing::debug!(
            transactions = stats.transaction_count,
            active_days = stats.active_days,
            total = stats.total,
            "Stats aggregated"
        );

        let patterns = detect_patterns(&stats, &self.config.patterns);
        tracing::debug!(count = patterns.len(), "Patterns detected");

        let budget_recommendations = allocate_budget(&stats, income, &self.config.budget);
        tracing::debug!(
            basis = ?budget_recommendations.basis,
            total = budget_recommendations.total_allocated,
            "Budget allocated"
        );

        let predictions = forecast_trend(expenses, &stats, income, &self.config.forecast);
        match &predictions {
            Some(p) => tracing::debug!(
                predicted_monthly = p.predicted_monthly,
                trend = ?p.trend,
                "Forecast computed"
            ),
            None => tracing::debug!("Not enough expenses to forecast"),
        }

        let alerts = generate_alerts(expenses, &stats, income, ctx.today, tz, &self.config.alerts);
        tracing::debug!(count = alerts.len(), "Alerts generated");

        let financial_health = score_health(&stats, &patterns, income, &self.config.health);
        tracing::debug!(
            score = financial_health.score,
            grade = %financial_health.grade,
            "Health scored"
        );

        let personalized_tips = personalized_tips(&stats, ctx.tip_seed);

        tracing::info!(
            expenses = expenses.len(),
            patterns = patterns.len(),
            alerts = alerts.len(),
            "Insight generation complete"
        );

        Insights {
            patterns,
            budget_recommendations,
            personalized_tips,
            predictions,
            alerts,
            stats,
            financial_health,
        }
    }
}
