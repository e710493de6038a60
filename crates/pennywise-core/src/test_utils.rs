//! Test fixtures for building ledgers and deterministic analysis contexts
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! server and CLI test suites.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::insights::AnalysisContext;
use crate::models::{Expense, ExpenseCategory, Income, IncomeCategory};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id(prefix: &str) -> String {
    format!("{}_{}", prefix, COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Noon UTC on the given day
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn expense(category: ExpenseCategory, amount: f64, occurred_at: DateTime<Utc>) -> Expense {
    Expense::new(
        next_id("exp"),
        format!("{} purchase", category),
        amount,
        category,
        occurred_at,
    )
}

pub fn income(category: IncomeCategory, amount: f64, occurred_at: DateTime<Utc>) -> Income {
    Income {
        id: next_id("inc"),
        description: format!("{} payment", category),
        amount,
        category,
        occurred_at,
        recurring: false,
        frequency: None,
    }
}

/// One expense per consecutive day starting at `start`, cycling through `amounts`
pub fn daily_expenses(
    category: ExpenseCategory,
    amounts: &[f64],
    start: NaiveDate,
) -> Vec<Expense> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            let day = start + chrono::Duration::days(i as i64);
            let occurred_at = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
            expense(category, amount, occurred_at)
        })
        .collect()
}

/// UTC context with a fixed date and tip seed
pub fn fixed_context(today: NaiveDate) -> AnalysisContext {
    AnalysisContext::new(today, chrono_tz::UTC, 42)
}
