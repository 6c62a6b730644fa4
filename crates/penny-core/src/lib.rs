//! Penny Core Library
//!
//! Shared functionality for the Penny expense tracker:
//! - Expense model and JSON/CSV expense loading
//! - Context assembler that turns expenses into a financial snapshot
//! - Local rule-based financial assistant (intent classifier, response
//!   composer, static knowledge base)
//! - Period spending summaries
//! - Assistant configuration

pub mod assistant;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod summary;

pub use assistant::{
    AIResponse, Band, Benchmarks, CannedResponder, FinancialAssistant, Intent, IntentClassifier,
    KnowledgeBase, Responder, ResponseSource,
};
pub use config::AssistantConfig;
pub use context::{CategoryTotal, ContextAssembler, FinancialContext, RecentExpense, Trend};
pub use error::{Error, Result};
pub use models::{Expense, ExpenseCategory};
pub use summary::{Period, SpendingSummary, SummaryKind};
