//! Assistant configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the user override (~/.config/penny/assistant.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Environment variables are applied last:
//! - `PENNY_CURRENCY`: currency symbol printed before amounts
//! - `PENNY_SEED`: fixed seed for template selection

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/assistant.toml");

/// Settings shared by the assistant and the context assembler
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Symbol printed in front of currency amounts
    pub currency_symbol: String,
    /// Observation window length in days
    pub window_days: u32,
    /// Maximum recent expenses in an assembled context
    pub recent_limit: usize,
    /// Maximum ranked categories in an assembled context
    pub top_limit: usize,
    /// Fixed RNG seed for template selection (None = random)
    pub seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "৳".to_string(),
            window_days: 30,
            recent_limit: 20,
            top_limit: 5,
            seed: None,
        }
    }
}

impl AssistantConfig {
    /// Load config (explicit path or user override, then embedded default) and apply env
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = load_config(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Parse config from TOML content on top of the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Apply `PENNY_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(symbol) = std::env::var("PENNY_CURRENCY") {
            if !symbol.trim().is_empty() {
                self.currency_symbol = symbol.trim().to_string();
            }
        }

        if let Ok(seed) = std::env::var("PENNY_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(value = %seed, "Ignoring invalid PENNY_SEED"),
            }
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("penny").join("assistant.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<AssistantConfig> {
    let content = match override_path {
        // An explicit path must exist
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Using user assistant config");
                fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?
            }
            _ => DEFAULT_CONFIG.to_string(),
        },
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    context: Option<RawContext>,
    responses: Option<RawResponses>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContext {
    window_days: Option<u32>,
    recent_limit: Option<usize>,
    top_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawResponses {
    seed: Option<u64>,
}

/// Longest observation window accepted from a config file (ten years)
const MAX_WINDOW_DAYS: u32 = 3650;

fn parse_config(content: &str) -> Result<AssistantConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AssistantConfig::default();

    if let Some(display) = raw.display {
        if let Some(symbol) = display.currency_symbol {
            config.currency_symbol = symbol;
        }
    }

    if let Some(context) = raw.context {
        if let Some(days) = context.window_days {
            if days == 0 || days > MAX_WINDOW_DAYS {
                return Err(Error::Config(format!(
                    "window_days must be between 1 and {}",
                    MAX_WINDOW_DAYS
                )));
            }
            config.window_days = days;
        }
        if let Some(limit) = context.recent_limit {
            config.recent_limit = limit;
        }
        if let Some(limit) = context.top_limit {
            config.top_limit = limit;
        }
    }

    if let Some(responses) = raw.responses {
        config.seed = responses.seed;
    }

    Ok(config)
}
