//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ExpenseCategory;

/// Severity level shared by patterns and alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Per-category spend total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// Summary statistics over an expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: f64,
    pub avg_per_transaction: f64,
    /// Category totals in first-seen order; absent categories count as 0
    pub category_totals: Vec<CategoryTotal>,
    /// None when there are no expenses
    pub highest_category: Option<ExpenseCategory>,
    pub transaction_count: usize,
    /// Distinct calendar days with an expense, at least 1
    pub active_days: usize,
    /// Linear 30-day extrapolation of spend over active days
    pub monthly_expenses: f64,
    pub expense_ratio: f64,
    pub savings_rate: f64,
    pub monthly_income: f64,
    /// Sum of recorded income entries (informational)
    pub income_total: f64,
    pub income_count: usize,
}

impl Stats {
    /// Total spend for a category, 0 if it has no transactions
    pub fn category_total(&self, category: ExpenseCategory) -> f64 {
        self.category_totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
            .unwrap_or(0.0)
    }

    pub fn has_income(&self) -> bool {
        self.monthly_income > 0.0
    }
}

/// Types of spending pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Average transaction size above threshold
    HighSpending,
    /// One category takes most of the spend
    CategoryDominance,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::HighSpending => "high_spending",
            PatternType::CategoryDominance => "category_dominance",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected spending pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

/// One category line of the budget plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSuggestion {
    pub category: ExpenseCategory,
    /// Fraction of the budget base
    pub percentage: f64,
    pub recommended: f64,
    pub current: f64,
    pub description: String,
}

/// What the budget base was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBasis {
    /// Declared monthly income
    Income,
    /// Extrapolated monthly spend (no income declared)
    ExtrapolatedSpend,
}

/// Budget plan across all categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendations {
    pub suggestions: Vec<BudgetSuggestion>,
    pub total_allocated: f64,
    pub basis: BudgetBasis,
    pub guideline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
        }
    }
}

/// Near-term spend forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub predicted_monthly: f64,
    pub trend: TrendDirection,
    /// Capped magnitude of change between windows (100 when the older window is empty)
    pub trend_percentage: f64,
    pub confidence: Confidence,
    /// Predicted monthly spend as % of income, 0 without income
    pub predicted_ratio: f64,
    pub recent_average: f64,
    pub older_average: f64,
}

/// Types of alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighDailySpending,
    UnusualCategorySpending,
    Overspending,
    HighSpending,
    LowSavings,
    CategoryOverspending,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighDailySpending => "high_daily_spending",
            AlertType::UnusualCategorySpending => "unusual_category_spending",
            AlertType::Overspending => "overspending",
            AlertType::HighSpending => "high_spending",
            AlertType::LowSavings => "low_savings",
            AlertType::CategoryOverspending => "category_overspending",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A threshold alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub action: String,
    /// Set for per-category alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
}

/// Letter grade for the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
    Unknown,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display color hint for the health grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl HealthColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthColor::Green => "green",
            HealthColor::Blue => "blue",
            HealthColor::Yellow => "yellow",
            HealthColor::Orange => "orange",
            HealthColor::Red => "red",
            HealthColor::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A remediation step attached to the health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub action: String,
}

/// Composite financial health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    /// 0-100
    pub score: f64,
    pub grade: Grade,
    pub status: String,
    pub color: HealthColor,
    pub recommendations: Vec<Recommendation>,
}

/// Everything the engine derives from one ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub patterns: Vec<Pattern>,
    pub budget_recommendations: BudgetRecommendations,
    pub personalized_tips: Vec<String>,
    /// None when there are too few expenses to forecast
    pub predictions: Option<Predictions>,
    pub alerts: Vec<Alert>,
    pub stats: Stats,
    pub financial_health: FinancialHealth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Critical.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Info.priority());
        assert_eq!(Severity::from_str("warning").unwrap(), Severity::Warning);
        assert!(Severity::from_str("alert").is_err());
    }

    #[test]
    fn test_alert_serialization() {
        let alert = Alert {
            alert_type: AlertType::LowSavings,
            severity: Severity::Warning,
            title: "Low Savings".to_string(),
            message: "m".to_string(),
            action: "a".to_string(),
            category: None,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "low_savings");
        assert_eq!(json["severity"], "warning");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_grade_serialization() {
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), "A+");
        assert_eq!(Grade::Unknown.as_str(), "Unknown");
        assert_eq!(serde_json::to_value(HealthColor::Gray).unwrap(), "gray");
    }

    #[test]
    fn test_category_total_defaults_to_zero() {
        let stats = Stats {
            total: 10.0,
            avg_per_transaction: 10.0,
            category_totals: vec![CategoryTotal {
                category: ExpenseCategory::Food,
                amount: 10.0,
            }],
            highest_category: Some(ExpenseCategory::Food),
            transaction_count: 1,
            active_days: 1,
            monthly_expenses: 300.0,
            expense_ratio: 0.0,
            savings_rate: 0.0,
            monthly_income: 0.0,
            income_total: 0.0,
            income_count: 0,
        };
        assert_eq!(stats.category_total(ExpenseCategory::Food), 10.0);
        assert_eq!(stats.category_total(ExpenseCategory::Travel), 0.0);
        assert!(!stats.has_income());
    }
}
