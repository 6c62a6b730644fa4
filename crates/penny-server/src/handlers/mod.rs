//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod assistant;
pub mod health;
pub mod insights;

// Re-export all handlers for use in router
pub use assistant::*;
pub use health::*;
pub use insights::*;

use chrono::NaiveDate;
use penny_core::Expense;

use crate::AppError;

/// Reject expenses the assistant cannot sum
pub(crate) fn validate_expenses(expenses: &[Expense]) -> Result<(), AppError> {
    if expenses
        .iter()
        .any(|e| !e.amount.is_finite() || e.amount < 0.0)
    {
        return Err(AppError::bad_request(
            "Expense amounts must be non-negative numbers",
        ));
    }
    Ok(())
}

/// The request's `today`, or the server's local date
pub(crate) fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}
