//! Domain models for Penny

use std::io::Read;

use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Expense categories offered by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    /// Display name, also the key used by the knowledge base
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Groceries => "Groceries",
            Self::PersonalCare => "Personal Care",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Groceries,
            Self::PersonalCare,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some(category) = Self::all()
            .iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
        {
            return Ok(*category);
        }

        match wanted.as_str() {
            "food_dining" | "food" | "dining" => Ok(Self::FoodDining),
            "transport" => Ok(Self::Transportation),
            "bills_utilities" | "bills" | "utilities" => Ok(Self::BillsUtilities),
            "personal_care" => Ok(Self::PersonalCare),
            _ => Err(format!("Unknown expense category: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount spent (non-negative)
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Calendar date of the expense
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount: f64, category: ExpenseCategory, date: NaiveDate) -> Self {
        Self {
            amount,
            category,
            note: None,
            date,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Load expenses from a JSON array
pub fn load_expenses_json<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let expenses: Vec<Expense> = serde_json::from_reader(reader)?;
    for (idx, expense) in expenses.iter().enumerate() {
        validate_amount(expense.amount)
            .map_err(|e| Error::InvalidData(format!("expense {}: {}", idx + 1, e)))?;
    }
    Ok(expenses)
}

/// Load expenses from CSV with a `date,amount,category[,note]` header row
pub fn load_expenses_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = idx + 2;

        let date_str = record
            .get(0)
            .ok_or_else(|| Error::InvalidData(format!("row {}: missing date", row)))?;
        let date = parse_date(date_str)
            .map_err(|e| Error::InvalidData(format!("row {}: {}", row, e)))?;

        let amount_str = record
            .get(1)
            .ok_or_else(|| Error::InvalidData(format!("row {}: missing amount", row)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::InvalidData(format!("row {}: {}", row, e)))?;

        let category = record
            .get(2)
            .ok_or_else(|| Error::InvalidData(format!("row {}: missing category", row)))?
            .parse::<ExpenseCategory>()
            .map_err(|e| Error::InvalidData(format!("row {}: {}", row, e)))?;

        let note = record
            .get(3)
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        expenses.push(Expense {
            amount,
            category,
            note,
            date,
        });
    }

    Ok(expenses)
}

/// Parse a date as `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("invalid date '{}' (use YYYY-MM-DD)", s))
}

/// Serde adapter accepting both plain dates and ISO-8601 timestamps
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date(&s).map_err(serde::de::Error::custom)
}

fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '৳' | ','))
        .collect();
    let amount = cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid amount '{}'", s))?;
    validate_amount(amount)?;
    Ok(amount)
}

fn validate_amount(amount: f64) -> std::result::Result<(), String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount must be a non-negative number, got {}", amount));
    }
    Ok(())
}
