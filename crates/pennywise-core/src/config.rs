//! Insight thresholds and category tables
//!
//! Every fixed number the engine uses lives here so tests (and users) can
//! override it without touching analysis code.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pennywise/config/insights.toml)
//!    or an explicitly passed path
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Override files may be partial; missing keys keep their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ExpenseCategory;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

const SHARE_TOLERANCE: f64 = 1e-6;

/// A category and its fraction of some base amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub share: f64,
}

/// Ordered per-category fractions; lookups for missing categories return 0
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTable(Vec<CategoryShare>);

impl CategoryTable {
    pub fn new(entries: &[(ExpenseCategory, f64)]) -> Self {
        Self(
            entries
                .iter()
                .map(|&(category, share)| CategoryShare { category, share })
                .collect(),
        )
    }

    pub fn get(&self, category: ExpenseCategory) -> f64 {
        self.0
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.share)
            .unwrap_or(0.0)
    }

    /// Replace a share in place, appending categories not yet present
    pub fn set(&mut self, category: ExpenseCategory, share: f64) {
        match self.0.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.share = share,
            None => self.0.push(CategoryShare { category, share }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryShare> {
        self.0.iter()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|e| e.share).sum()
    }
}

/// Pattern detection thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternThresholds {
    /// Average transaction size (currency units) above which spending is "high"
    pub high_avg_transaction: f64,
    /// Share of total (0-1) above which one category dominates
    pub dominance_share: f64,
}

impl Default for PatternThresholds {
    fn default() -> Self {
        Self {
            high_avg_transaction: 50.0,
            dominance_share: 0.60,
        }
    }
}

/// Budget allocation table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSettings {
    pub allocation: CategoryTable,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            allocation: CategoryTable::new(&[
                (ExpenseCategory::Bills, 0.50),
                (ExpenseCategory::Food, 0.15),
                (ExpenseCategory::Transport, 0.15),
                (ExpenseCategory::Shopping, 0.10),
                (ExpenseCategory::Education, 0.05),
                (ExpenseCategory::Travel, 0.03),
                (ExpenseCategory::Other, 0.02),
            ]),
        }
    }
}

/// Alert thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertThresholds {
    /// Today's spend above this multiple of the average transaction
    pub daily_spike_multiplier: f64,
    /// Today's category spend above this multiple of its daily average
    pub category_spike_multiplier: f64,
    /// Expense ratio (%) above which spending exceeds income
    pub overspending_ratio: f64,
    /// Expense ratio (%) above which spending is high
    pub high_spending_ratio: f64,
    /// Savings rate (%) below which savings are low
    pub low_savings_rate: f64,
    /// Monthly category spend limits as a fraction of income
    pub category_limits: CategoryTable,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            daily_spike_multiplier: 2.0,
            category_spike_multiplier: 3.0,
            overspending_ratio: 100.0,
            high_spending_ratio: 80.0,
            low_savings_rate: 10.0,
            category_limits: CategoryTable::new(&[
                (ExpenseCategory::Food, 0.15),
                (ExpenseCategory::Transport, 0.15),
                (ExpenseCategory::Shopping, 0.10),
                (ExpenseCategory::Bills, 0.50),
                (ExpenseCategory::Education, 0.10),
                (ExpenseCategory::Travel, 0.08),
                (ExpenseCategory::Other, 0.05),
            ]),
        }
    }
}

/// A score deduction applied when a metric crosses `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTier {
    pub threshold: f64,
    pub penalty: f64,
}

/// Financial health scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSettings {
    /// Applied when expense ratio is above the threshold; first match wins
    pub expense_ratio_tiers: Vec<PenaltyTier>,
    /// Applied when savings rate is below the threshold; first match wins
    pub savings_rate_tiers: Vec<PenaltyTier>,
    pub warning_pattern_penalty: f64,
    pub recommend_ratio_above: f64,
    pub recommend_savings_below: f64,
    pub recommend_score_below: f64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            expense_ratio_tiers: vec![
                PenaltyTier {
                    threshold: 90.0,
                    penalty: 40.0,
                },
                PenaltyTier {
                    threshold: 70.0,
                    penalty: 25.0,
                },
                PenaltyTier {
                    threshold: 50.0,
                    penalty: 10.0,
                },
            ],
            savings_rate_tiers: vec![
                PenaltyTier {
                    threshold: 10.0,
                    penalty: 20.0,
                },
                PenaltyTier {
                    threshold: 20.0,
                    penalty: 10.0,
                },
            ],
            warning_pattern_penalty: 10.0,
            recommend_ratio_above: 80.0,
            recommend_savings_below: 20.0,
            recommend_score_below: 70.0,
        }
    }
}

/// Trend forecasting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSettings {
    /// Below this many expenses no prediction is made
    pub min_transactions: usize,
    /// Size of the recent and older comparison windows
    pub window_size: usize,
    /// More expenses than this yields "high" confidence
    pub high_confidence_count: usize,
    pub max_trend_percent: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_transactions: 3,
            window_size: 7,
            high_confidence_count: 10,
            max_trend_percent: 999.0,
        }
    }
}

/// Complete insights engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightsConfig {
    pub patterns: PatternThresholds,
    pub budget: BudgetSettings,
    pub alerts: AlertThresholds,
    pub health: HealthSettings,
    pub forecast: ForecastSettings,
}

impl InsightsConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit override path (missing file means defaults)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a (possibly partial) TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Check table sums and value ranges
    pub fn validate(&self) -> Result<()> {
        let allocation_total = self.budget.allocation.total();
        if (allocation_total - 1.0).abs() > SHARE_TOLERANCE {
            return Err(Error::Config(format!(
                "budget allocation must sum to 1.0, got {:.4}",
                allocation_total
            )));
        }

        let bad_share = self
            .budget
            .allocation
            .iter()
            .chain(self.alerts.category_limits.iter())
            .find(|e| !e.share.is_finite() || e.share < 0.0);
        if let Some(entry) = bad_share {
            return Err(Error::Config(format!(
                "invalid share for {}: {}",
                entry.category, entry.share
            )));
        }

        let non_negative = [
            ("patterns.high_avg_transaction", self.patterns.high_avg_transaction),
            ("patterns.dominance_share", self.patterns.dominance_share),
            ("alerts.daily_spike_multiplier", self.alerts.daily_spike_multiplier),
            (
                "alerts.category_spike_multiplier",
                self.alerts.category_spike_multiplier,
            ),
            ("health.warning_pattern_penalty", self.health.warning_pattern_penalty),
            ("forecast.max_trend_percent", self.forecast.max_trend_percent),
        ];
        if let Some((name, value)) = non_negative
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(Error::Config(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }

        // Percentages; a negative savings threshold is allowed
        let percentages = [
            ("alerts.overspending_ratio", self.alerts.overspending_ratio),
            ("alerts.high_spending_ratio", self.alerts.high_spending_ratio),
            ("alerts.low_savings_rate", self.alerts.low_savings_rate),
            ("health.recommend_ratio_above", self.health.recommend_ratio_above),
            ("health.recommend_savings_below", self.health.recommend_savings_below),
            ("health.recommend_score_below", self.health.recommend_score_below),
        ];
        if let Some((name, value)) = percentages.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::Config(format!("{} must be a number, got {}", name, value)));
        }

        let health = &self.health;
        check_tiers("health.expense_ratio_tiers", &health.expense_ratio_tiers, |a, b| a > b)?;
        check_tiers("health.savings_rate_tiers", &health.savings_rate_tiers, |a, b| a < b)?;

        if self.forecast.window_size == 0 {
            return Err(Error::Config("forecast.window_size must be at least 1".into()));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(&RawConfig::from(self))
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Tiers are matched first to last, so thresholds must get less severe
/// down the list: `ordered(prev, next)` must hold for each neighbouring pair.
fn check_tiers(
    name: &str,
    tiers: &[PenaltyTier],
    ordered: impl Fn(f64, f64) -> bool,
) -> Result<()> {
    for tier in tiers {
        if !tier.threshold.is_finite() || !tier.penalty.is_finite() || tier.penalty < 0.0 {
            return Err(Error::Config(format!(
                "{}: invalid tier (threshold {}, penalty {})",
                name, tier.threshold, tier.penalty
            )));
        }
    }

    if let Some(pair) = tiers.windows(2).find(|w| !ordered(w[0].threshold, w[1].threshold)) {
        return Err(Error::Config(format!(
            "{}: tier {} is shadowed by tier {}; list the most severe threshold first",
            name, pair[1].threshold, pair[0].threshold
        )));
    }

    Ok(())
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pennywise").join("config").join("insights.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<InsightsConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading insights config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    let config = parse_config(&content)?;
    config.validate()?;
    Ok(config)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<RawPatterns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<RawBudget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alerts: Option<RawAlerts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    health: Option<RawHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<RawForecast>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawPatterns {
    high_avg_transaction: Option<f64>,
    dominance_share: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawBudget {
    allocation: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawAlerts {
    daily_spike_multiplier: Option<f64>,
    category_spike_multiplier: Option<f64>,
    overspending_ratio: Option<f64>,
    high_spending_ratio: Option<f64>,
    low_savings_rate: Option<f64>,
    category_limits: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawHealth {
    warning_pattern_penalty: Option<f64>,
    recommend_ratio_above: Option<f64>,
    recommend_savings_below: Option<f64>,
    recommend_score_below: Option<f64>,
    expense_ratio_tiers: Option<Vec<PenaltyTier>>,
    savings_rate_tiers: Option<Vec<PenaltyTier>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawForecast {
    min_transactions: Option<usize>,
    window_size: Option<usize>,
    high_confidence_count: Option<usize>,
    max_trend_percent: Option<f64>,
}

fn raw_table(table: &CategoryTable) -> BTreeMap<String, f64> {
    table
        .iter()
        .map(|e| (e.category.as_str().to_string(), e.share))
        .collect()
}

impl From<&InsightsConfig> for RawConfig {
    fn from(config: &InsightsConfig) -> Self {
        Self {
            patterns: Some(RawPatterns {
                high_avg_transaction: Some(config.patterns.high_avg_transaction),
                dominance_share: Some(config.patterns.dominance_share),
            }),
            budget: Some(RawBudget {
                allocation: Some(raw_table(&config.budget.allocation)),
            }),
            alerts: Some(RawAlerts {
                daily_spike_multiplier: Some(config.alerts.daily_spike_multiplier),
                category_spike_multiplier: Some(config.alerts.category_spike_multiplier),
                overspending_ratio: Some(config.alerts.overspending_ratio),
                high_spending_ratio: Some(config.alerts.high_spending_ratio),
                low_savings_rate: Some(config.alerts.low_savings_rate),
                category_limits: Some(raw_table(&config.alerts.category_limits)),
            }),
            health: Some(RawHealth {
                warning_pattern_penalty: Some(config.health.warning_pattern_penalty),
                recommend_ratio_above: Some(config.health.recommend_ratio_above),
                recommend_savings_below: Some(config.health.recommend_savings_below),
                recommend_score_below: Some(config.health.recommend_score_below),
                expense_ratio_tiers: Some(config.health.expense_ratio_tiers.clone()),
                savings_rate_tiers: Some(config.health.savings_rate_tiers.clone()),
            }),
            forecast: Some(RawForecast {
                min_transactions: Some(config.forecast.min_transactions),
                window_size: Some(config.forecast.window_size),
                high_confidence_count: Some(config.forecast.high_confidence_count),
                max_trend_percent: Some(config.forecast.max_trend_percent),
            }),
        }
    }
}

/// Apply raw category shares onto a table, skipping unknown category names
fn apply_table(table: &mut CategoryTable, raw: BTreeMap<String, f64>, section: &str) {
    for (name, share) in raw {
        match name.parse::<ExpenseCategory>() {
            Ok(category) => table.set(category, share),
            Err(_) => {
                tracing::warn!(section, category = %name, "Skipping unknown category in config");
            }
        }
    }
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(patterns) = raw.patterns {
        if let Some(v) = patterns.high_avg_transaction {
            config.patterns.high_avg_transaction = v;
        }
        if let Some(v) = patterns.dominance_share {
            config.patterns.dominance_share = v;
        }
    }

    if let Some(allocation) = raw.budget.and_then(|b| b.allocation) {
        apply_table(&mut config.budget.allocation, allocation, "budget.allocation");
    }

    if let Some(alerts) = raw.alerts {
        if let Some(v) = alerts.daily_spike_multiplier {
            config.alerts.daily_spike_multiplier = v;
        }
        if let Some(v) = alerts.category_spike_multiplier {
            config.alerts.category_spike_multiplier = v;
        }
        if let Some(v) = alerts.overspending_ratio {
            config.alerts.overspending_ratio = v;
        }
        if let Some(v) = alerts.high_spending_ratio {
            config.alerts.high_spending_ratio = v;
        }
        if let Some(v) = alerts.low_savings_rate {
            config.alerts.low_savings_rate = v;
        }
        if let Some(limits) = alerts.category_limits {
            apply_table(&mut config.alerts.category_limits, limits, "alerts.category_limits");
        }
    }

    if let Some(health) = raw.health {
        if let Some(v) = health.warning_pattern_penalty {
            config.health.warning_pattern_penalty = v;
        }
        if let Some(v) = health.recommend_ratio_above {
            config.health.recommend_ratio_above = v;
        }
        if let Some(v) = health.recommend_savings_below {
            config.health.recommend_savings_below = v;
        }
        if let Some(v) = health.recommend_score_below {
            config.health.recommend_score_below = v;
        }
        if let Some(tiers) = health.expense_ratio_tiers {
            config.health.expense_ratio_tiers = tiers;
        }
        if let Some(tiers) = health.savings_rate_tiers {
            config.health.savings_rate_tiers = tiers;
        }
    }

    if let Some(forecast) = raw.forecast {
        if let Some(v) = forecast.min_transactions {
            config.forecast.min_transactions = v;
        }
        if let Some(v) = forecast.window_size {
            config.forecast.window_size = v;
        }
        if let Some(v) = forecast.high_confidence_count {
            config.forecast.high_confidence_count = v;
        }
        if let Some(v) = forecast.max_trend_percent {
            config.forecast.max_trend_percent = v;
        }
    }

    Ok(config)
}
