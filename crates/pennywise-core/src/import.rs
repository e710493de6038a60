//! Record loaders for ledger JSON files and expense/income CSV exports

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseCategory, Frequency, Income, IncomeCategory, Ledger};

/// Expense CSV row: `id,description,amount,category,date`
#[derive(Debug, Deserialize)]
struct ExpenseRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    amount: String,
    category: String,
    date: String,
}

/// Income CSV row: `id,description,amount,category,date[,recurring,frequency]`
#[derive(Debug, Deserialize)]
struct IncomeRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    amount: String,
    category: String,
    date: String,
    #[serde(default)]
    recurring: Option<String>,
    #[serde(default)]
    frequency: Option<String>,
}

/// Parse a ledger JSON document and validate it
pub fn parse_ledger_json(content: &str) -> Result<Ledger> {
    let ledger: Ledger = serde_json::from_str(content)?;
    ledger.validate()?;
    debug!(
        expenses = ledger.expenses.len(),
        incomes = ledger.incomes.len(),
        "Parsed ledger"
    );
    Ok(ledger)
}

pub fn load_ledger_json(path: &Path) -> Result<Ledger> {
    let content = fs::read_to_string(path)?;
    parse_ledger_json(&content)
}

/// Parse an expense CSV export; plain dates are local midnight in `tz`
pub fn parse_expenses_csv<R: Read>(reader: R, tz: &Tz) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for (i, result) in rdr.deserialize::<ExpenseRow>().enumerate() {
        let line = i + 2;
        let row = result?;

        let category: ExpenseCategory = row
            .category
            .parse()
            .map_err(|e: String| Error::Import(format!("line {}: {}", line, e)))?;
        let amount = parse_amount(&row.amount, line)?;
        let occurred_at = parse_timestamp(&row.date, tz, line)?;
        let id = non_empty(row.id).unwrap_or_else(|| format!("expense-{}", line));
        let description = non_empty(row.description).unwrap_or_default();

        expenses.push(Expense::new(id, description, amount, category, occurred_at));
    }

    let ledger = Ledger::new(expenses, Vec::new(), 0.0);
    ledger.validate()?;
    debug!("Parsed {} expenses", ledger.expenses.len());
    Ok(ledger.expenses)
}

/// Parse an income CSV export; the recurrence columns may be omitted
pub fn parse_incomes_csv<R: Read>(reader: R, tz: &Tz) -> Result<Vec<Income>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut incomes = Vec::new();
    for (i, result) in rdr.deserialize::<IncomeRow>().enumerate() {
        let line = i + 2;
        let row = result?;

        let category: IncomeCategory = row
            .category
            .parse()
            .map_err(|e: String| Error::Import(format!("line {}: {}", line, e)))?;
        let amount = parse_amount(&row.amount, line)?;
        let occurred_at = parse_timestamp(&row.date, tz, line)?;
        let recurring = match non_empty(row.recurring) {
            Some(flag) => parse_flag(&flag, line)?,
            None => false,
        };
        let frequency = non_empty(row.frequency)
            .map(|f| {
                f.parse::<Frequency>()
                    .map_err(|e| Error::Import(format!("line {}: {}", line, e)))
            })
            .transpose()?;

        incomes.push(Income {
            id: non_empty(row.id).unwrap_or_else(|| format!("income-{}", line)),
            description: non_empty(row.description).unwrap_or_default(),
            amount,
            category,
            occurred_at,
            recurring,
            frequency,
        });
    }

    let ledger = Ledger::new(Vec::new(), incomes, 0.0);
    ledger.validate()?;
    debug!("Parsed {} incomes", ledger.incomes.len());
    Ok(ledger.incomes)
}

/// Build a ledger from CSV files on disk
pub fn load_ledger_csv(
    expenses_path: &Path,
    incomes_path: Option<&Path>,
    monthly_income: f64,
    tz: &Tz,
) -> Result<Ledger> {
    let expenses = parse_expenses_csv(fs::File::open(expenses_path)?, tz)?;
    let incomes = match incomes_path {
        Some(path) => parse_incomes_csv(fs::File::open(path)?, tz)?,
        None => Vec::new(),
    };

    let ledger = Ledger::new(expenses, incomes, monthly_income);
    ledger.validate()?;
    Ok(ledger)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse an amount string, handling currency symbols and thousands separators
fn parse_amount(s: &str, line: usize) -> Result<f64> {
    let cleaned = s.trim().replace(['$', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("line {}: unable to parse amount: {}", line, s)))
}

/// First instant of `date` in `tz`
///
/// Zones that skip midnight on a DST change start the day at the first
/// valid hour instead.
fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    (0..3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|ts| ts.with_timezone(&Utc))
}

/// RFC 3339 timestamps, or plain dates taken as midnight in `tz`
fn parse_timestamp(s: &str, tz: &Tz, line: usize) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(midnight) = start_of_day(date, tz) {
                return Ok(midnight);
            }
        }
    }

    Err(Error::Import(format!(
        "line {}: unable to parse date: {}",
        line, s
    )))
}

fn parse_flag(s: &str, line: usize) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(Error::Import(format!(
            "line {}: expected true or false, got {}",
            line, s
        ))),
    }
}
