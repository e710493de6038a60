//! Stats Aggregator
//!
//! Reduces an expense list (plus declared income) into the summary numbers
//! every other component reads.

use std::collections::HashSet;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::models::{Expense, Income};

use super::types::{CategoryTotal, Stats};

/// Days in the flat monthly extrapolation
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Calendar day of an expense in the analysis timezone
pub fn local_day(expense: &Expense, tz: &Tz) -> NaiveDate {
    expense.occurred_at.with_timezone(tz).date_naive()
}

/// Count of distinct calendar days with an expense, at least 1
pub fn active_days(expenses: &[Expense], tz: &Tz) -> usize {
    let days: HashSet<NaiveDate> = expenses.iter().map(|e| local_day(e, tz)).collect();
    days.len().max(1)
}

/// Sum amounts per category, keeping first-seen order
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => total.amount += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category,
                amount: expense.amount,
            }),
        }
    }
    totals
}

/// Aggregate expenses into [`Stats`]
pub fn aggregate(expenses: &[Expense], incomes: &[Income], monthly_income: f64, tz: &Tz) -> Stats {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let transaction_count = expenses.len();
    let avg_per_transaction = total / transaction_count.max(1) as f64;

    let category_totals = category_totals(expenses);

    // Strictly greater keeps the first-seen category on ties
    let mut highest: Option<&CategoryTotal> = None;
    for entry in &category_totals {
        if highest.map_or(true, |h| entry.amount > h.amount) {
            highest = Some(entry);
        }
    }
    let highest_category = highest.map(|h| h.category);

    let active_days = active_days(expenses, tz);
    let monthly_expenses = total * (DAYS_PER_MONTH / active_days as f64);

    let (expense_ratio, savings_rate) = if monthly_income > 0.0 {
        (
            monthly_expenses / monthly_income * 100.0,
            (monthly_income - monthly_expenses) / monthly_income * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    Stats {
        total,
        avg_per_transaction,
        category_totals,
        highest_category,
        transaction_count,
        active_days,
        monthly_expenses,
        expense_ratio,
        savings_rate,
        monthly_income,
        income_total: incomes.iter().map(|i| i.amount).sum(),
        income_count: incomes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};
    use crate::test_utils::{at, daily_expenses, date, expense, income};
    use chrono::{TimeZone, Utc};

    const EPS: f64 = 1e-6;

    #[test]
    fn test_scenario_three_food_expenses() {
        let expenses = vec![
            expense(ExpenseCategory::Food, 20.0, at(2026, 3, 1)),
            expense(ExpenseCategory::Food, 30.0, at(2026, 3, 1)),
            expense(ExpenseCategory::Food, 50.0, at(2026, 3, 2)),
        ];
        let stats = aggregate(&expenses, &[], 1000.0, &chrono_tz::UTC);

        assert!((stats.total - 100.0).abs() < EPS);
        assert_eq!(stats.active_days, 2);
        assert!((stats.monthly_expenses - 1500.0).abs() < EPS);
        assert!((stats.expense_ratio - 150.0).abs() < EPS);
        assert!((stats.savings_rate + 50.0).abs() < EPS);
        assert_eq!(stats.highest_category, Some(ExpenseCategory::Food));
    }

    #[test]
    fn test_empty_expenses() {
        let stats = aggregate(&[], &[], 0.0, &chrono_tz::UTC);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.avg_per_transaction, 0.0);
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(stats.active_days, 1);
        assert_eq!(stats.monthly_expenses, 0.0);
        assert!(stats.highest_category.is_none());
        assert!(stats.category_totals.is_empty());
    }

    #[test]
    fn test_linear_extrapolation_drives_ratio() {
        let expenses = daily_expenses(ExpenseCategory::Food, &[100.0; 12], date(2026, 2, 1));
        let stats = aggregate(&expenses, &[], 2000.0, &chrono_tz::UTC);

        assert_eq!(stats.active_days, 12);
        assert!((stats.monthly_expenses - 3000.0).abs() < EPS);
        assert!((stats.expense_ratio - 150.0).abs() < EPS);
    }

    #[test]
    fn test_category_totals_sum_to_total() {
        let amounts = [12.5, 7.25, 100.0, 3.1, 45.0, 0.99];
        let categories = ExpenseCategory::all();
        let expenses: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| expense(categories[i % 4], a, at(2026, 3, 1 + i as u32)))
            .collect();
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);

        let sum: f64 = stats.category_totals.iter().map(|c| c.amount).sum();
        assert!((sum - stats.total).abs() < EPS);
        assert_eq!(stats.category_totals.len(), 4);
    }

    #[test]
    fn test_ratio_and_savings_sum_to_hundred() {
        for income_value in [500.0, 1234.56, 10_000.0] {
            let expenses = daily_expenses(ExpenseCategory::Bills, &[40.0, 60.0, 15.5], date(2026, 1, 5));
            let stats = aggregate(&expenses, &[], income_value, &chrono_tz::UTC);
            assert!((stats.expense_ratio + stats.savings_rate - 100.0).abs() < EPS);
        }
    }

    #[test]
    fn test_highest_category_tie_keeps_first_seen() {
        let expenses = vec![
            expense(ExpenseCategory::Travel, 50.0, at(2026, 3, 1)),
            expense(ExpenseCategory::Food, 50.0, at(2026, 3, 1)),
        ];
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);
        assert_eq!(stats.highest_category, Some(ExpenseCategory::Travel));
    }

    #[test]
    fn test_active_days_use_timezone() {
        // 23:30 UTC on Mar 1 and 00:30 UTC on Mar 2 are the same day in New York
        let expenses = vec![
            expense(
                ExpenseCategory::Food,
                10.0,
                Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap(),
            ),
            expense(
                ExpenseCategory::Food,
                10.0,
                Utc.with_ymd_and_hms(2026, 3, 2, 0, 30, 0).unwrap(),
            ),
        ];
        assert_eq!(active_days(&expenses, &chrono_tz::UTC), 2);
        assert_eq!(active_days(&expenses, &chrono_tz::America::New_York), 1);
    }

    #[test]
    fn test_income_entries_are_informational() {
        let expenses = vec![expense(ExpenseCategory::Food, 10.0, at(2026, 3, 1))];
        let incomes = vec![
            income(IncomeCategory::Freelance, 400.0, at(2026, 3, 1)),
            income(IncomeCategory::Gift, 100.0, at(2026, 3, 2)),
        ];
        let stats = aggregate(&expenses, &incomes, 0.0, &chrono_tz::UTC);
        assert_eq!(stats.income_total, 500.0);
        assert_eq!(stats.income_count, 2);
        assert_eq!(stats.expense_ratio, 0.0);
        assert_eq!(stats.savings_rate, 0.0);
    }
}
