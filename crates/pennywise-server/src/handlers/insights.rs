//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState};
use pennywise_core::insights::{aggregate, Insights, Stats};
use pennywise_core::{
    parse_timezone, AnalysisContext, Expense, Income, InsightsConfig, Ledger,
};

/// Request body for insight generation
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    /// Declared monthly salary (0 or absent = unset)
    #[serde(default)]
    pub monthly_income: f64,
    /// IANA timezone for day bucketing (default UTC)
    pub timezone: Option<String>,
    /// Override for "today" in that timezone
    pub today: Option<NaiveDate>,
    /// Fixed seed for the general tip
    pub seed: Option<u64>,
}

impl InsightsRequest {
    /// Validate the body and split it into engine inputs
    fn into_parts(self) -> Result<(Ledger, AnalysisContext), AppError> {
        let timezone = match self.timezone.as_deref() {
            Some(name) => parse_timezone(name).map_err(AppError::from_core)?,
            None => chrono_tz::UTC,
        };

        let mut ctx = AnalysisContext::now(timezone);
        if let Some(today) = self.today {
            ctx.today = today;
        }
        if let Some(seed) = self.seed {
            ctx.tip_seed = seed;
        }

        let ledger = Ledger::new(self.expenses, self.incomes, self.monthly_income);
        ledger.validate().map_err(AppError::from_core)?;

        Ok((ledger, ctx))
    }
}

/// Unwrap a JSON body, reporting both syntax and shape problems as 400
fn parse_body(
    body: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<InsightsRequest, AppError> {
    body.map(|Json(req)| req)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// POST /api/insights - Run the full engine over the posted records
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<Insights>, AppError> {
    let (ledger, ctx) = parse_body(body)?.into_parts()?;

    tracing::debug!(
        expenses = ledger.expenses.len(),
        incomes = ledger.incomes.len(),
        timezone = %ctx.timezone,
        "Generating insights"
    );

    Ok(Json(state.engine.generate_insights(&ledger, &ctx)))
}

/// POST /api/insights/stats - Aggregated stats only
pub async fn generate_stats(
    body: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<Stats>, AppError> {
    let (ledger, ctx) = parse_body(body)?.into_parts()?;

    Ok(Json(aggregate(
        &ledger.expenses,
        &ledger.incomes,
        ledger.monthly_income,
        &ctx.timezone,
    )))
}

/// GET /api/insights/config - Thresholds the engine is running with
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<InsightsConfig> {
    Json(state.engine.config().clone())
}
