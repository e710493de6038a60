//! Health Scorer
//!
//! Combines expense ratio, savings rate and warning patterns into a 0-100
//! score with a letter grade and remediation steps.

use crate::config::{HealthSettings, PenaltyTier};

use super::types::{
    FinancialHealth, Grade, HealthColor, Pattern, Priority, Recommendation, Severity, Stats,
};

/// Grade breakpoints, highest first: (minimum score, grade, color, status)
const GRADES: &[(f64, Grade, HealthColor, &str)] = &[
    (90.0, Grade::APlus, HealthColor::Green, "Excellent"),
    (80.0, Grade::A, HealthColor::Green, "Very Good"),
    (70.0, Grade::B, HealthColor::Blue, "Good"),
    (60.0, Grade::C, HealthColor::Yellow, "Fair"),
    (50.0, Grade::D, HealthColor::Orange, "Needs Improvement"),
];

fn grade_for(score: f64) -> (Grade, HealthColor, &'static str) {
    GRADES
        .iter()
        .find(|(min, ..)| score >= *min)
        .map(|&(_, grade, color, status)| (grade, color, status))
        .unwrap_or((Grade::F, HealthColor::Red, "Poor"))
}

fn first_penalty(tiers: &[PenaltyTier], matches: impl Fn(f64) -> bool) -> f64 {
    tiers
        .iter()
        .find(|t| matches(t.threshold))
        .map(|t| t.penalty)
        .unwrap_or(0.0)
}

fn add_income_recommendation() -> Recommendation {
    Recommendation {
        priority: Priority::High,
        title: "Add Your Income".to_string(),
        message: "Your financial health can't be scored without a monthly income".to_string(),
        action: "Set your monthly income in settings".to_string(),
    }
}

fn recommendations(stats: &Stats, score: f64, settings: &HealthSettings) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if stats.expense_ratio > settings.recommend_ratio_above {
        recs.push(Recommendation {
            priority: Priority::High,
            title: "Reduce Monthly Spending".to_string(),
            message: format!(
                "You're spending {:.0}% of your income. Aim for under {:.0}%",
                stats.expense_ratio, settings.recommend_ratio_above
            ),
            action: "Identify your three largest expenses and cut one".to_string(),
        });
    }

    if stats.savings_rate < settings.recommend_savings_below {
        recs.push(Recommendation {
            priority: Priority::Medium,
            title: "Increase Your Savings".to_string(),
            message: format!(
                "Your savings rate is {:.1}%. Try to save at least {:.0}% of income",
                stats.savings_rate, settings.recommend_savings_below
            ),
            action: "Set up an automatic transfer on payday".to_string(),
        });
    }

    if score < settings.recommend_score_below {
        recs.push(Recommendation {
            priority: Priority::Low,
            title: "Follow a Budget Plan".to_string(),
            message: "A category budget helps keep spending predictable".to_string(),
            action: "Use the budget recommendations as monthly targets".to_string(),
        });
    }

    recs
}

/// Score financial health; without income the score is 0 and the grade Unknown
pub fn score_health(
    stats: &Stats,
    patterns: &[Pattern],
    monthly_income: f64,
    settings: &HealthSettings,
) -> FinancialHealth {
    if monthly_income <= 0.0 {
        return FinancialHealth {
            score: 0.0,
            grade: Grade::Unknown,
            status: "Add your monthly income to calculate your financial health".to_string(),
            color: HealthColor::Gray,
            recommendations: vec![add_income_recommendation()],
        };
    }

    let ratio_penalty = first_penalty(&settings.expense_ratio_tiers, |t| stats.expense_ratio > t);
    let savings_penalty = first_penalty(&settings.savings_rate_tiers, |t| stats.savings_rate < t);
    let warnings = patterns
        .iter()
        .filter(|p| p.severity == Severity::Warning)
        .count();
    let pattern_penalty = warnings as f64 * settings.warning_pattern_penalty;

    let score = (100.0 - ratio_penalty - savings_penalty - pattern_penalty).clamp(0.0, 100.0);
    let (grade, color, status) = grade_for(score);

    tracing::trace!(
        score,
        ratio_penalty,
        savings_penalty,
        pattern_penalty,
        "Health score computed"
    );

    FinancialHealth {
        score,
        grade,
        status: status.to_string(),
        color,
        recommendations: recommendations(stats, score, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternThresholds;
    use crate::insights::patterns::detect_patterns;
    use crate::insights::stats::aggregate;
    use crate::insights::types::PatternType;
    use crate::models::ExpenseCategory;
    use crate::test_utils::{at, daily_expenses, date, expense};

    fn warning() -> Pattern {
        Pattern {
            pattern_type: PatternType::HighSpending,
            severity: Severity::Warning,
            message: String::new(),
            suggestion: String::new(),
        }
    }

    #[test]
    fn test_no_income_is_unknown() {
        let expenses = vec![expense(ExpenseCategory::Food, 10.0, at(2026, 3, 1))];
        let stats = aggregate(&expenses, &[], 0.0, &chrono_tz::UTC);
        let health = score_health(&stats, &[], 0.0, &HealthSettings::default());

        assert_eq!(health.score, 0.0);
        assert_eq!(health.grade, Grade::Unknown);
        assert_eq!(health.color, HealthColor::Gray);
        assert_eq!(health.recommendations.len(), 1);
        assert_eq!(health.recommendations[0].title, "Add Your Income");
    }

    #[test]
    fn test_overspending_scenario_penalties() {
        let expenses = vec![
            expense(ExpenseCategory::Food, 20.0, at(2026, 3, 1)),
            expense(ExpenseCategory::Food, 30.0, at(2026, 3, 1)),
            expense(ExpenseCategory::Food, 50.0, at(2026, 3, 2)),
        ];
        let stats = aggregate(&expenses, &[], 1000.0, &chrono_tz::UTC);
        let patterns = detect_patterns(&stats, &PatternThresholds::default());
        let health = score_health(&stats, &patterns, 1000.0, &HealthSettings::default());

        // -40 for ratio > 90, -20 for savings < 10; dominance is info only
        assert_eq!(health.score, 40.0);
        assert_eq!(health.grade, Grade::F);
        assert_eq!(health.color, HealthColor::Red);
        assert_eq!(health.recommendations.len(), 3);
        assert_eq!(health.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn test_perfect_score() {
        let expenses = daily_expenses(ExpenseCategory::Food, &[10.0; 10], date(2026, 3, 1));
        let stats = aggregate(&expenses, &[], 5000.0, &chrono_tz::UTC);
        let health = score_health(&stats, &[], 5000.0, &HealthSettings::default());

        assert_eq!(health.score, 100.0);
        assert_eq!(health.grade, Grade::APlus);
        assert_eq!(health.color, HealthColor::Green);
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_middle_tiers() {
        // 600/month on 1000 income: ratio 60 (-10), savings 40 (none)
        let expenses = daily_expenses(ExpenseCategory::Bills, &[20.0; 30], date(2026, 1, 1));
        let stats = aggregate(&expenses, &[], 1000.0, &chrono_tz::UTC);
        let health = score_health(&stats, &[warning()], 1000.0, &HealthSettings::default());

        assert_eq!(health.score, 80.0);
        assert_eq!(health.grade, Grade::A);
    }

    #[test]
    fn test_score_is_clamped() {
        let expenses = vec![expense(ExpenseCategory::Travel, 900.0, at(2026, 3, 1))];
        let stats = aggregate(&expenses, &[], 100.0, &chrono_tz::UTC);
        let patterns = vec![warning(); 8];
        let health = score_health(&stats, &patterns, 100.0, &HealthSettings::default());

        assert_eq!(health.score, 0.0);
        assert_eq!(health.grade, Grade::F);
    }

    #[test]
    fn test_grade_breakpoints() {
        assert_eq!(grade_for(90.0).0, Grade::APlus);
        assert_eq!(grade_for(89.9).0, Grade::A);
        assert_eq!(grade_for(70.0).0, Grade::B);
        assert_eq!(grade_for(60.0).0, Grade::C);
        assert_eq!(grade_for(50.0), (Grade::D, HealthColor::Orange, "Needs Improvement"));
        assert_eq!(grade_for(49.0).0, Grade::F);
    }

    #[test]
    fn test_score_bounds_hold_across_inputs() {
        let settings = HealthSettings::default();
        for income in [1.0, 50.0, 800.0, 1e6] {
            for amount in [0.0, 5.0, 300.0, 1e5] {
                let expenses = vec![expense(ExpenseCategory::Other, amount, at(2026, 3, 1))];
                let stats = aggregate(&expenses, &[], income, &chrono_tz::UTC);
                let patterns = detect_patterns(&stats, &PatternThresholds::default());
                let health = score_health(&stats, &patterns, income, &settings);
                assert!((0.0..=100.0).contains(&health.score));
            }
        }
    }
}
