//! Insight Engine - spending analysis over an expense ledger
//!
//! Each component is a pure function over the ledger and previously computed
//! results. The engine runs them in dependency order:
//!
//! - **Stats** - totals, category breakdown, active days, income ratios
//! - **Patterns** - high average transaction, category dominance
//! - **Budget** - fixed-share category plan against income or spend
//! - **Forecast** - monthly projection and recent-vs-older trend
//! - **Alerts** - same-day spikes and income-relative limits
//! - **Health** - 0-100 score, grade and recommendations
//! - **Tips** - category tips plus one seeded general tip
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pennywise_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::with_config(InsightsConfig::load()?);
//! let ctx = AnalysisContext::now(chrono_tz::UTC);
//! let insights = engine.generate_insights(&ledger, &ctx);
//! ```

pub mod alerts;
pub mod budget;
pub mod engine;
pub mod forecast;
pub mod health;
pub mod patterns;
pub mod stats;
pub mod tips;
pub mod types;

pub use alerts::generate_alerts;
pub use budget::allocate_budget;
pub use engine::{parse_timezone, AnalysisContext, InsightEngine};
pub use forecast::forecast_trend;
pub use health::score_health;
pub use patterns::detect_patterns;
pub use stats::{aggregate, DAYS_PER_MONTH};
pub use tips::personalized_tips;
pub use types::{
    Alert, AlertType, BudgetBasis, BudgetRecommendations, BudgetSuggestion, CategoryTotal,
    Confidence, FinancialHealth, Grade, HealthColor, Insights, Pattern, PatternType, Predictions,
    Priority, Recommendation, Severity, Stats, TrendDirection,
};
