//! Ask command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use penny_core::assistant::Reply;
use penny_core::{
    AssistantConfig, ContextAssembler, FinancialAssistant, FinancialContext, Responder,
};

use super::load_expenses;

/// Where the financial context for a question comes from
pub enum ContextSource {
    /// No data: an empty context
    Empty,
    /// A ready-made context JSON file
    ContextFile(PathBuf),
    /// Raw expenses, assembled into a context ending at `today`
    Expenses { path: PathBuf, today: NaiveDate },
}

/// Build the financial context for a question
pub fn resolve_context(
    config: &AssistantConfig,
    source: &ContextSource,
) -> Result<FinancialContext> {
    match source {
        ContextSource::Empty => Ok(FinancialContext::default()),
        ContextSource::ContextFile(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid financial context in {}", path.display()))
        }
        ContextSource::Expenses { path, today } => {
            let expenses = load_expenses(path)?;
            Ok(ContextAssembler::from_config(config).assemble(&expenses, *today))
        }
    }
}

/// Answer a question, returning the tagged reply
pub fn ask(
    config: &AssistantConfig,
    message: &str,
    source: &ContextSource,
    seed: Option<u64>,
) -> Result<Reply> {
    if message.trim().is_empty() {
        anyhow::bail!(penny_core::Error::EmptyMessage);
    }

    let context = resolve_context(config, source)?;

    // --seed wins over the configured seed
    let mut config = config.clone();
    if seed.is_some() {
        config.seed = seed;
    }
    let assistant = FinancialAssistant::from_config(&config)?;

    Ok(assistant.reply(message, &context))
}

pub fn cmd_ask(
    config: &AssistantConfig,
    message: &str,
    source: &ContextSource,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let reply = ask(config, message, source, seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!();
    println!("💬 {}", reply.response.message);

    if let Some(suggestions) = &reply.response.suggestions {
        println!();
        for suggestion in suggestions {
            println!("   • {}", suggestion);
        }
    }

    if let Some(follow_up) = &reply.response.follow_up {
        println!();
        println!("   {}", follow_up);
    }

    println!();
    println!(
        "   \x1b[2mintent: {} · confidence: {:.2}\x1b[0m",
        reply.intent, reply.response.confidence
    );

    Ok(())
}
