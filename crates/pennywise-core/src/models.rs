//! Data models for Pennywise
//!
//! Records arrive from the CRUD layer already persisted; the engine treats
//! them as immutable input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Normalize a category label for lenient matching ("Part-time Job" == "part_time_job")
fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(alias = "food")]
    Food,
    #[serde(alias = "transport")]
    Transport,
    #[serde(alias = "shopping")]
    Shopping,
    #[serde(alias = "bills")]
    Bills,
    #[serde(alias = "education")]
    Education,
    #[serde(alias = "travel")]
    Travel,
    #[serde(alias = "other")]
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Get all expense categories
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Bills,
            Self::Education,
            Self::Travel,
            Self::Other,
        ]
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize_label(c.as_str()) == wanted)
            .ok_or_else(|| format!("Unknown expense category: {}", s))
    }
}

/// Income category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[serde(alias = "freelance")]
    Freelance,
    #[serde(rename = "Part-time Job", alias = "part_time_job")]
    PartTimeJob,
    #[serde(alias = "investment")]
    Investment,
    #[serde(alias = "bonus")]
    Bonus,
    #[serde(alias = "gift")]
    Gift,
    #[serde(alias = "rental")]
    Rental,
    #[serde(alias = "business")]
    Business,
    #[serde(alias = "dividend")]
    Dividend,
    #[serde(alias = "interest")]
    Interest,
    #[serde(rename = "Side Hustle", alias = "side_hustle")]
    SideHustle,
    #[serde(alias = "commission")]
    Commission,
    #[serde(alias = "royalty")]
    Royalty,
    #[serde(alias = "other")]
    Other,
}

impl IncomeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freelance => "Freelance",
            Self::PartTimeJob => "Part-time Job",
            Self::Investment => "Investment",
            Self::Bonus => "Bonus",
            Self::Gift => "Gift",
            Self::Rental => "Rental",
            Self::Business => "Business",
            Self::Dividend => "Dividend",
            Self::Interest => "Interest",
            Self::SideHustle => "Side Hustle",
            Self::Commission => "Commission",
            Self::Royalty => "Royalty",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [IncomeCategory] {
        &[
            Self::Freelance,
            Self::PartTimeJob,
            Self::Investment,
            Self::Bonus,
            Self::Gift,
            Self::Rental,
            Self::Business,
            Self::Dividend,
            Self::Interest,
            Self::SideHustle,
            Self::Commission,
            Self::Royalty,
            Self::Other,
        ]
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncomeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize_label(c.as_str()) == wanted)
            .ok_or_else(|| format!("Unknown income category: {}", s))
    }
}

/// Recurrence frequency for income records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub occurred_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            category,
            occurred_at,
        }
    }
}

/// A single income record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: IncomeCategory,
    pub occurred_at: DateTime<Utc>,
    /// Informational only, not used by the engine
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

/// Everything the engine needs for one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    /// Declared monthly salary; 0 disables income-relative metrics
    #[serde(default)]
    pub monthly_income: f64,
}

impl Ledger {
    pub fn new(expenses: Vec<Expense>, incomes: Vec<Income>, monthly_income: f64) -> Self {
        Self {
            expenses,
            incomes,
            monthly_income,
        }
    }

    /// Reject records the engine cannot reason about (negative or non-finite amounts)
    pub fn validate(&self) -> Result<()> {
        if !self.monthly_income.is_finite() || self.monthly_income < 0.0 {
            return Err(Error::InvalidData(format!(
                "monthly income must be a non-negative number, got {}",
                self.monthly_income
            )));
        }

        for expense in &self.expenses {
            if !expense.amount.is_finite() || expense.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "expense {} has invalid amount {}",
                    expense.id, expense.amount
                )));
            }
        }

        for income in &self.incomes {
            if !income.amount.is_finite() || income.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "income {} has invalid amount {}",
                    income.id, income.amount
                )));
            }
        }

        Ok(())
    }
}
