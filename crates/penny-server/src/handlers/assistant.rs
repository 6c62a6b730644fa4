//! Assistant chat handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use penny_core::assistant::Reply;
use penny_core::{Expense, FinancialContext, Intent};

use super::{today_or_now, validate_expenses};
use crate::{AppError, AppState};

/// Request body for a chat message with a precomputed context
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: FinancialContext,
}

/// Request body for a chat message with raw expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Reference date for the observation window (defaults to today)
    pub today: Option<NaiveDate>,
}

/// Request body for classification only
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response for classification
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub intent: Intent,
    pub confidence: f64,
}

/// The message, or a 400 when it is missing or blank
fn required_message(message: Option<String>) -> Result<String, AppError> {
    match message {
        Some(m) if !m.trim().is_empty() => Ok(m),
        _ => Err(AppError::bad_request(&penny_core::Error::EmptyMessage.to_string())),
    }
}

fn reply(state: &AppState, message: &str, context: &FinancialContext) -> Reply {
    let reply = state.responder.reply(message, context);
    info!(
        intent = reply.intent.as_str(),
        source = reply.source.as_str(),
        confidence = reply.response.confidence,
        chars = message.chars().count(),
        "Chat reply"
    );
    reply
}

/// POST /api/assistant/chat - Answer a message against a supplied context
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Reply>, AppError> {
    let message = required_message(body.message)?;
    Ok(Json(reply(&state, &message, &body.context)))
}

/// POST /api/assistant/chat/expenses - Answer a message against raw expenses
///
/// The context is assembled server-side from the expenses in the window
/// ending at `today`.
pub async fn chat_with_expenses(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExpenseChatRequest>,
) -> Result<Json<Reply>, AppError> {
    let message = required_message(body.message)?;
    validate_expenses(&body.expenses)?;

    let context = state
        .assembler
        .assemble(&body.expenses, today_or_now(body.today));

    Ok(Json(reply(&state, &message, &context)))
}

/// POST /api/assistant/classify - Classify a message without answering it
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let message = required_message(body.message)?;
    let intent = state.assistant.classify(&message);

    Ok(Json(ClassifyResponse {
        intent,
        confidence: intent.confidence(),
    }))
}
