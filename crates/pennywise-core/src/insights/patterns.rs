//! Pattern Detector
//!
//! Flags named spending characteristics from aggregated stats.

use crate::config::PatternThresholds;

use super::types::{Pattern, PatternType, Severity, Stats};

/// Detect spending patterns, in evaluation order
pub fn detect_patterns(stats: &Stats, thresholds: &PatternThresholds) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    if stats.avg_per_transaction > thresholds.high_avg_transaction {
        patterns.push(Pattern {
            pattern_type: PatternType::HighSpending,
            severity: Severity::Warning,
            message: format!(
                "Your average transaction is ${:.2}, above the ${:.0} mark",
                stats.avg_per_transaction, thresholds.high_avg_transaction
            ),
            suggestion: "Review larger purchases and wait a day before buying non-essentials"
                .to_string(),
        });
    }

    if stats.total > 0.0 {
        for entry in &stats.category_totals {
            let share = entry.amount / stats.total;
            if share > thresholds.dominance_share {
                patterns.push(Pattern {
                    pattern_type: PatternType::CategoryDominance,
                    severity: Severity::Info,
                    message: format!(
                        "{} accounts for {:.0}% of your spending",
                        entry.category,
                        share * 100.0
                    ),
                    suggestion: format!(
                        "Look for ways to diversify or trim {} costs",
                        entry.category.as_str().to_lowercase()
                    ),
                });
            }
        }
    }

    patterns
}
