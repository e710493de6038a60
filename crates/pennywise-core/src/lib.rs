//! Pennywise Core Library
//!
//! Shared functionality for the Pennywise expense tracker:
//! - Expense and income record types
//! - Insight engine (stats, patterns, budget, forecast, alerts, health, tips)
//! - Threshold configuration with embedded defaults
//! - JSON and CSV record loaders

pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;

/// Fixture builders for ledgers and fixed analysis contexts
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::InsightsConfig;
pub use error::{Error, Result};
pub use import::{
    load_ledger_csv, load_ledger_json, parse_expenses_csv, parse_incomes_csv, parse_ledger_json,
};
pub use insights::{parse_timezone, AnalysisContext, InsightEngine, Insights};
pub use models::{Expense, ExpenseCategory, Frequency, Income, IncomeCategory, Ledger};
