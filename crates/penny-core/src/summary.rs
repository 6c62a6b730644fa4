//! Period spending summaries
//!
//! A plain-text digest of one calendar period (this week, month or year):
//! totals, the daily average, the biggest categories and a short piece of
//! advice. Used by the `summary` command and the insights endpoint.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assistant::UNKNOWN_CATEGORY;
use crate::context::CategoryTotal;
use crate::models::{Expense, ExpenseCategory};

/// Daily average above which spending is called out as high
const HIGH_DAILY_AVERAGE: f64 = 50.0;

/// Top-category share of the total that triggers a recommendation
const DOMINANT_SHARE: f64 = 0.4;

/// Total above this many days of the daily average is a warning
const WARNING_DAYS: f64 = 40.0;

/// Number of ranked categories in a summary
const TOP_CATEGORIES: usize = 3;

/// Calendar period covered by a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// First day of the period containing `today` (weeks start on Sunday)
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
            }
            Period::Month => today.with_day(1).unwrap_or(today),
            Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(format!("Unknown period: {} (use week, month or year)", s)),
        }
    }
}

/// Kind of advice a summary carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Tip,
    Warning,
    Recommendation,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Tip => "tip",
            SummaryKind::Warning => "warning",
            SummaryKind::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Digest of spending over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expense_count: usize,
    pub total_spent: f64,
    pub daily_average: f64,
    /// Main category of concern; `None` when nothing was spent
    pub top_category: Option<ExpenseCategory>,
    pub top_categories: Vec<CategoryTotal>,
    pub summary: String,
    pub advice: String,
    pub trends: String,
    pub kind: SummaryKind,
}

impl SpendingSummary {
    /// Main category of concern, `Other` when nothing was spent
    pub fn category(&self) -> ExpenseCategory {
        self.top_category.unwrap_or(ExpenseCategory::Other)
    }
}

/// Summarize the expenses dated within the period containing `today`
pub fn summarize(
    expenses: &[Expense],
    period: Period,
    today: NaiveDate,
    currency: &str,
) -> SpendingSummary {
    let start = period.start_date(today);
    let in_period: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= today)
        .collect();

    let days = ((today - start).num_days() + 1).max(1);
    let money = |amount: f64| format!("{}{:.2}", currency, amount);

    if in_period.is_empty() {
        return SpendingSummary {
            period,
            start_date: start,
            end_date: today,
            expense_count: 0,
            total_spent: 0.0,
            daily_average: 0.0,
            top_category: None,
            top_categories: Vec::new(),
            summary: "Start tracking your expenses to get personalized insights!".to_string(),
            advice: "Record each expense as it happens to see where your money goes.".to_string(),
            trends: format!("No spending recorded this {} yet.", period),
            kind: SummaryKind::Tip,
        };
    }

    let total_spent: f64 = in_period.iter().map(|e| e.amount).sum();
    let daily_average = total_spent / days as f64;

    let mut by_category: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
    for expense in &in_period {
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    let mut ranked: Vec<(ExpenseCategory, f64)> = by_category.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(TOP_CATEGORIES);

    let top = ranked.first().copied();

    let advice = match top {
        Some((category, amount)) => format!(
            "Your top spending category is {} ({}). Consider reviewing these expenses for potential savings.",
            category,
            money(amount)
        ),
        None => "Great job tracking your expenses! Keep monitoring your spending to identify patterns."
            .to_string(),
    };

    let trends = if daily_average > HIGH_DAILY_AVERAGE {
        "Your daily spending is above average. Consider setting a daily budget to better control expenses."
    } else {
        "Your spending looks well-controlled. Keep up the good financial habits!"
    };

    let kind = if total_spent > daily_average * WARNING_DAYS {
        SummaryKind::Warning
    } else if top.is_some_and(|(_, amount)| amount > total_spent * DOMINANT_SHARE) {
        SummaryKind::Recommendation
    } else {
        SummaryKind::Tip
    };

    tracing::debug!(
        period = period.as_str(),
        expenses = in_period.len(),
        total_spent,
        kind = kind.as_str(),
        top = top.map(|(c, _)| c.as_str()).unwrap_or(UNKNOWN_CATEGORY),
        "Built spending summary"
    );

    SpendingSummary {
        period,
        start_date: start,
        end_date: today,
        expense_count: in_period.len(),
        total_spent,
        daily_average,
        top_category: top.map(|(category, _)| category),
        top_categories: ranked
            .into_iter()
            .map(|(category, amount)| CategoryTotal::new(category.as_str(), amount))
            .collect(),
        summary: format!(
            "You spent {} this {}, averaging {} per day.",
            money(total_spent),
            period,
            money(daily_average)
        ),
        advice,
        trends: trends.to_string(),
        kind,
    }
}
