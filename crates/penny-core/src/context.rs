//! Financial context snapshot and the assembler that builds it
//!
//! The assistant never looks at raw expenses. Callers hand it a
//! [`FinancialContext`]: totals, a daily average, ranked categories, the most
//! recent expenses and a month-over-month trend label.
//!
//! [`ContextAssembler`] computes that snapshot from a list of expenses for
//! callers that do not aggregate on their own (the CLI and the
//! `/chat/expenses` endpoint).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::models::Expense;

/// Relative change, either way, that still counts as a stable trend
const STABLE_BAND: f64 = 0.10;

/// Direction of spending compared with the previous period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }

    /// Factor applied to the current total to predict the next period
    pub fn multiplier(&self) -> f64 {
        match self {
            Trend::Increasing => 1.1,
            Trend::Decreasing => 0.9,
            Trend::Stable => 1.0,
        }
    }

    /// Closing sentence for spending analyses
    pub fn remark(&self) -> &'static str {
        match self {
            Trend::Increasing => "📈 Spending is trending upward - consider setting limits.",
            Trend::Decreasing => "📉 Great job reducing expenses - keep it up!",
            Trend::Stable => "📊 Spending is stable - good consistency.",
        }
    }

    /// Advice clause appended to predictions
    pub fn advice(&self) -> &'static str {
        match self {
            Trend::Increasing => "consider setting weekly spending limits to manage growth",
            Trend::Decreasing => "you're successfully reducing expenses - maintain this momentum",
            Trend::Stable => "consistency is good - now focus on optimization",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "increasing" => Ok(Trend::Increasing),
            "decreasing" => Ok(Trend::Decreasing),
            "stable" => Ok(Trend::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// Amount spent in one category over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// A recent expense, informational only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentExpense {
    pub amount: f64,
    pub category: String,
    #[serde(deserialize_with = "crate::models::deserialize_date")]
    pub date: NaiveDate,
}

/// Numeric snapshot handed to the assistant for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialContext {
    /// Sum of expense amounts in the observation window
    pub total_spent: f64,
    /// `total_spent` divided by the window length in days
    pub daily_average: f64,
    /// Descending by amount, unique category names
    pub top_categories: Vec<CategoryTotal>,
    pub recent_expenses: Vec<RecentExpense>,
    pub monthly_trend: Trend,
}

impl FinancialContext {
    pub fn new(total_spent: f64, daily_average: f64, monthly_trend: Trend) -> Self {
        Self {
            total_spent,
            daily_average,
            monthly_trend,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>, amount: f64) -> Self {
        self.top_categories.push(CategoryTotal::new(category, amount));
        self
    }

    /// Highest-spend category, if any expenses were recorded
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.top_categories.first()
    }

    /// Percentage of `total_spent` that `amount` represents (0 when nothing was spent)
    pub fn share_of_total(&self, amount: f64) -> f64 {
        if self.total_spent > 0.0 && self.total_spent.is_finite() && amount.is_finite() {
            amount / self.total_spent * 100.0
        } else {
            0.0
        }
    }
}

/// Builds a [`FinancialContext`] from raw expenses
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    /// Observation window length in days
    pub window_days: u32,
    /// Maximum recent expenses carried in the context
    pub recent_limit: usize,
    /// Maximum ranked categories carried in the context
    pub top_limit: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self {
            window_days: 30,
            recent_limit: 20,
            top_limit: 5,
        }
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            window_days: config.window_days,
            recent_limit: config.recent_limit,
            top_limit: config.top_limit,
        }
    }

    fn window_len(&self) -> i64 {
        i64::from(self.window_days.max(1))
    }

    /// `window_len` days before `date`, clamped to the earliest representable date
    fn window_before(&self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_signed(Duration::days(self.window_len()))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Assemble a context, deriving the trend from the preceding window
    pub fn assemble(&self, expenses: &[Expense], today: NaiveDate) -> FinancialContext {
        let trend = self.detect_trend(expenses, today);
        self.assemble_with_trend(expenses, today, trend)
    }

    /// Assemble a context with a caller-supplied trend
    pub fn assemble_with_trend(
        &self,
        expenses: &[Expense],
        today: NaiveDate,
        trend: Trend,
    ) -> FinancialContext {
        let start = self.window_before(today);
        let mut in_window: Vec<&Expense> = expenses
            .iter()
            .filter(|e| e.date > start && e.date <= today)
            .collect();

        let total_spent: f64 = in_window.iter().map(|e| e.amount).sum();
        let daily_average = total_spent / self.window_len() as f64;

        // BTreeMap keeps equal amounts in name order after the stable sort
        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for expense in &in_window {
            *by_category.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
        }
        let mut top_categories: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryTotal::new(category, amount))
            .collect();
        top_categories.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        top_categories.truncate(self.top_limit);

        in_window.sort_by(|a, b| b.date.cmp(&a.date));
        let recent_expenses = in_window
            .iter()
            .take(self.recent_limit)
            .map(|e| RecentExpense {
                amount: e.amount,
                category: e.category.as_str().to_string(),
                date: e.date,
            })
            .collect();

        tracing::debug!(
            window_days = self.window_days,
            expenses = in_window.len(),
            total_spent,
            trend = trend.as_str(),
            "Assembled financial context"
        );

        FinancialContext {
            total_spent,
            daily_average,
            top_categories,
            recent_expenses,
            monthly_trend: trend,
        }
    }

    /// Compare the current window with the one before it
    pub fn detect_trend(&self, expenses: &[Expense], today: NaiveDate) -> Trend {
        let current_start = self.window_before(today);
        let previous_start = self.window_before(current_start);

        let mut current = 0.0;
        let mut previous = 0.0;
        for expense in expenses {
            if expense.date > current_start && expense.date <= today {
                current += expense.amount;
            } else if expense.date > previous_start && expense.date <= current_start {
                previous += expense.amount;
            }
        }

        if previous <= 0.0 {
            return Trend::Stable;
        }

        let change = (current - previous) / previous;
        if change > STABLE_BAND {
            Trend::Increasing
        } else if change < -STABLE_BAND {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}
