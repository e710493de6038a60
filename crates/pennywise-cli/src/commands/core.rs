//! Shared command utilities
//!
//! This module contains:
//! - `GlobalOpts` - flags every command sees
//! - `load_config` / `load_ledger` / `build_context` - engine inputs
//! - `run_analysis` - the full engine run behind the analysis commands

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use pennywise_core::{
    load_ledger_csv, load_ledger_json, parse_timezone, AnalysisContext, InsightEngine, Insights,
    InsightsConfig, Ledger,
};

use crate::cli::InputArgs;

/// Global flags passed down from the command line
#[derive(Debug, Clone, Copy)]
pub struct GlobalOpts<'a> {
    pub config: Option<&'a Path>,
    pub tz: &'a str,
    pub json: bool,
}

/// Load thresholds from an explicit file, else the override location or built-ins
pub fn load_config(path: Option<&Path>) -> Result<InsightsConfig> {
    match path {
        Some(path) => InsightsConfig::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => InsightsConfig::load().context("Failed to load config"),
    }
}

/// Read records from a ledger JSON file or expense/income CSVs
///
/// Plain CSV dates are read as local days in `tz`.
pub fn load_ledger(input: &InputArgs, tz: &Tz) -> Result<Ledger> {
    let mut ledger = match (&input.ledger, &input.expenses) {
        (Some(path), _) => load_ledger_json(path)
            .with_context(|| format!("Failed to load ledger: {}", path.display()))?,
        (None, Some(expenses)) => load_ledger_csv(expenses, input.incomes.as_deref(), 0.0, tz)
            .with_context(|| format!("Failed to load expenses: {}", expenses.display()))?,
        (None, None) => anyhow::bail!("Provide --ledger or --expenses"),
    };

    if let Some(income) = input.income {
        ledger.monthly_income = income;
        ledger.validate().context("Invalid --income")?;
    }

    Ok(ledger)
}

/// Analysis context from --tz, --today and --seed
pub fn build_context(input: &InputArgs, tz: &str) -> Result<AnalysisContext> {
    let timezone = parse_timezone(tz).context("Invalid --tz")?;
    let mut ctx = AnalysisContext::now(timezone);

    if let Some(today) = &input.today {
        ctx.today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)")?;
    }
    if let Some(seed) = input.seed {
        ctx.tip_seed = seed;
    }

    Ok(ctx)
}

/// Load everything and run the engine once
pub fn run_analysis(input: &InputArgs, opts: &GlobalOpts) -> Result<Insights> {
    let config = load_config(opts.config)?;
    let ctx = build_context(input, opts.tz)?;
    let ledger = load_ledger(input, &ctx.timezone)?;

    tracing::debug!(
        expenses = ledger.expenses.len(),
        incomes = ledger.incomes.len(),
        today = %ctx.today,
        timezone = %ctx.timezone,
        "Running analysis"
    );

    Ok(InsightEngine::with_config(config).generate_insights(&ledger, &ctx))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}
