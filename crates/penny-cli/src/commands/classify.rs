//! Classify command implementation

use anyhow::Result;
use penny_core::{AssistantConfig, FinancialAssistant, Intent};

/// Classify a message with the full assistant's rules
pub fn classify(config: &AssistantConfig, message: &str) -> Result<Intent> {
    let assistant = FinancialAssistant::from_config(config)?;
    Ok(assistant.classify(message))
}

pub fn cmd_classify(config: &AssistantConfig, message: &str) -> Result<()> {
    let intent = classify(config, message)?;
    println!("{} ({:.2})", intent, intent.confidence());
    Ok(())
}
