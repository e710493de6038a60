//! Budget Allocator
//!
//! Applies the fixed category allocation table to a budget base and sets
//! it against what was actually spent.

use crate::config::BudgetSettings;
use crate::models::ExpenseCategory;

use super::types::{BudgetBasis, BudgetRecommendations, BudgetSuggestion, Stats};

fn describe(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Bills => "Rent, utilities, insurance and other fixed costs",
        ExpenseCategory::Food => "Groceries and dining out",
        ExpenseCategory::Transport => "Fuel, transit passes and ride shares",
        ExpenseCategory::Shopping => "Clothing, electronics and household items",
        ExpenseCategory::Education => "Courses, books and learning materials",
        ExpenseCategory::Travel => "Trips, lodging and holiday spending",
        ExpenseCategory::Other => "Everything that does not fit elsewhere",
    }
}

/// Build the per-category budget plan
///
/// The base is declared income when present, otherwise the extrapolated
/// monthly spend, so a plan is always produced.
pub fn allocate_budget(
    stats: &Stats,
    monthly_income: f64,
    settings: &BudgetSettings,
) -> BudgetRecommendations {
    let (total_allocated, basis) = if monthly_income > 0.0 {
        (monthly_income, BudgetBasis::Income)
    } else {
        (stats.monthly_expenses, BudgetBasis::ExtrapolatedSpend)
    };

    let suggestions = settings
        .allocation
        .iter()
        .map(|entry| BudgetSuggestion {
            category: entry.category,
            percentage: entry.share,
            recommended: (total_allocated * entry.share).round(),
            current: stats.category_total(entry.category),
            description: describe(entry.category).to_string(),
        })
        .collect();

    let guideline = match basis {
        BudgetBasis::Income => format!(
            "Based on your actual income of ${:.2} per month",
            total_allocated
        ),
        BudgetBasis::ExtrapolatedSpend => format!(
            "Based on your extrapolated spending of ${:.2} per month. Add your income for a more accurate plan",
            total_allocated
        ),
    };

    BudgetRecommendations {
        suggestions,
        total_allocated,
        basis,
        guideline,
    }
}
