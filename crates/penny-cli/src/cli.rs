//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Penny - A local, rule-based financial assistant
#[derive(Parser)]
#[command(name = "penny")]
#[command(about = "Ask questions about your spending, answered locally", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Assistant config file (defaults to ~/.config/penny/assistant.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a question
    Ask {
        /// The question, e.g. "how much did I spend?"
        message: String,

        /// Financial context JSON file (totalSpent, dailyAverage, topCategories, ...)
        #[arg(long, conflicts_with = "expenses")]
        context: Option<PathBuf>,

        /// Expenses file (.csv with date,amount,category[,note], or a JSON array)
        #[arg(short, long)]
        expenses: Option<PathBuf>,

        /// Last day of the observation window (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Fixed seed for template selection
        #[arg(long)]
        seed: Option<u64>,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which intent a message is classified as
    Classify {
        /// The message to classify
        message: String,
    },

    /// Summarize spending for the current week, month or year
    Summary {
        /// Expenses file (.csv or JSON array)
        #[arg(short, long)]
        expenses: PathBuf,

        /// Period: week, month, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Last day of the period (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
