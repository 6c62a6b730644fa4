//! Insight handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use penny_core::summary::summarize;
use penny_core::{Expense, Period, SpendingSummary};

use super::{today_or_now, validate_expenses};
use crate::{AppError, AppState};

/// Request body for a period summary
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Last day of the period (defaults to today)
    pub today: Option<NaiveDate>,
}

/// POST /api/insights/summary - Summarize spending for the current week, month or year
pub async fn spending_summary(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummaryRequest>,
) -> Result<Json<SpendingSummary>, AppError> {
    validate_expenses(&body.expenses)?;

    let summary = summarize(
        &body.expenses,
        body.period,
        today_or_now(body.today),
        &state.assistant_config.currency_symbol,
    );

    Ok(Json(summary))
}
