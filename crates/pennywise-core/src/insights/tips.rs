//! Personalized savings tips
//!
//! Up to two tips for the highest-spend category, then one general tip
//! drawn from a fixed pool. The draw is seeded so a given `(stats, seed)`
//! always yields the same list.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::ExpenseCategory;

use super::types::Stats;

/// Most tips returned for a single category
pub const MAX_CATEGORY_TIPS: usize = 2;

pub const GENERAL_TIPS: &[&str] = &[
    "Track every expense for a month to see where your money really goes",
    "Follow the 24-hour rule before any unplanned purchase over $50",
    "Move savings out of your checking account as soon as you get paid",
    "Review subscriptions every quarter and cancel the ones you don't use",
    "Build an emergency fund that covers three months of expenses",
    "Set a weekly spending limit and check in on it every Sunday",
];

fn category_tips(category: ExpenseCategory) -> &'static [&'static str] {
    match category {
        ExpenseCategory::Food => &[
            "Plan weekly meals and shop with a list to avoid impulse buys",
            "Cook in batches and bring lunch to work a few days a week",
            "Limit dining out to special occasions",
        ],
        ExpenseCategory::Transport => &[
            "Use public transit or carpool for your regular commute",
            "Combine errands into a single trip to save fuel",
        ],
        ExpenseCategory::Shopping => &[
            "Unsubscribe from retailer emails to reduce temptation",
            "Keep a wishlist and buy only what is still on it after 30 days",
        ],
        ExpenseCategory::Bills => &[
            "Call providers once a year to negotiate lower rates",
            "Switch off standby devices to cut your energy bill",
        ],
        ExpenseCategory::Education => &[
            "Buy used textbooks or borrow them from the library",
            "Look for free courses before paying for one",
        ],
        ExpenseCategory::Travel => &[
            "Book flights early and travel off-season",
            "Compare accommodation prices across several sites",
        ],
        ExpenseCategory::Other => &[
            "Put miscellaneous purchases into a real category to spot leaks",
        ],
    }
}

/// Select tips for the given stats; deterministic for a fixed seed
pub fn personalized_tips(stats: &Stats, seed: u64) -> Vec<String> {
    let mut tips: Vec<String> = stats
        .highest_category
        .map(|c| {
            category_tips(c)
                .iter()
                .take(MAX_CATEGORY_TIPS)
                .map(|t| t.to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut rng = StdRng::seed_from_u64(seed);
    if let Some(general) = GENERAL_TIPS.choose(&mut rng) {
        tips.push(general.to_string());
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::stats::aggregate;
    use crate::test_utils::{at, expense};

    #[test]
    fn test_same_seed_same_tips() {
        let expenses = vec![expense(ExpenseCategory::Food, 25.0, at(2026, 3, 1))];
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);
        assert_eq!(personalized_tips(&stats, 7), personalized_tips(&stats, 7));
    }

    #[test]
    fn test_category_tips_capped_at_two() {
        let expenses = vec![expense(ExpenseCategory::Food, 25.0, at(2026, 3, 1))];
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);
        let tips = personalized_tips(&stats, 1);

        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0], category_tips(ExpenseCategory::Food)[0]);
        assert_eq!(tips[1], category_tips(ExpenseCategory::Food)[1]);
        assert!(GENERAL_TIPS.contains(&tips[2].as_str()));
    }

    #[test]
    fn test_single_tip_category() {
        let expenses = vec![expense(ExpenseCategory::Other, 5.0, at(2026, 3, 1))];
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);
        assert_eq!(personalized_tips(&stats, 3).len(), 2);
    }

    #[test]
    fn test_no_expenses_only_general_tip() {
        let stats = aggregate(&[], &[], 0.0, &chrono_tz::UTC);
        let tips = personalized_tips(&stats, 99);
        assert_eq!(tips.len(), 1);
        assert!(GENERAL_TIPS.contains(&tips[0].as_str()));
    }

    #[test]
    fn test_seeds_cover_pool() {
        let stats = aggregate(&[], &[], 0.0, &chrono_tz::UTC);
        let seen: std::collections::HashSet<String> = (0..200)
            .flat_map(|seed| personalized_tips(&stats, seed))
            .collect();
        assert!(seen.len() > 1);
    }
}
