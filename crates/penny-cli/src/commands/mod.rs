//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ask` - Ask the assistant a question
//! - `classify` - Show the intent a message maps to
//! - `summary` - Period spending summary
//! - `serve` - Web server command
//!
//! Shared helpers for config, expense files and dates live here.

pub mod ask;
pub mod classify;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use ask::*;
pub use classify::*;
pub use serve::*;
pub use summary::*;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use penny_core::models::{load_expenses_csv, load_expenses_json, parse_date};
use penny_core::{AssistantConfig, Expense};

/// Load the assistant config, falling back to the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AssistantConfig> {
    let config = AssistantConfig::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load config from {}", p.display()),
        None => "Failed to load assistant config".to_string(),
    })?;
    tracing::debug!(
        currency = %config.currency_symbol,
        window_days = config.window_days,
        seed = ?config.seed,
        "Loaded assistant config"
    );
    Ok(config)
}

/// Load expenses from a `.csv` file or a JSON array
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let expenses = if is_csv {
        load_expenses_csv(reader)
    } else {
        load_expenses_json(reader)
    }
    .with_context(|| format!("Failed to read expenses from {}", path.display()))?;

    tracing::debug!(count = expenses.len(), path = %path.display(), "Loaded expenses");
    Ok(expenses)
}

/// Parse `--today`, defaulting to the local date
pub fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_date(s).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
