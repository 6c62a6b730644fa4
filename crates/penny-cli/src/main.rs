//! Penny CLI - Local rule-based financial assistant
//!
//! Usage:
//!   penny ask "how much did I spend?" --expenses expenses.csv
//!   penny classify "should I save or budget?"
//!   penny summary --expenses expenses.csv --period week
//!   penny serve --port 3000

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask {
            message,
            context,
            expenses,
            today,
            seed,
            json,
        } => {
            let source = match (context, expenses) {
                (Some(path), _) => commands::ContextSource::ContextFile(path),
                (None, Some(path)) => commands::ContextSource::Expenses {
                    path,
                    today: commands::parse_today(today.as_deref())?,
                },
                (None, None) => commands::ContextSource::Empty,
            };
            commands::cmd_ask(&config, &message, &source, seed, json)
        }
        Commands::Classify { message } => commands::cmd_classify(&config, &message),
        Commands::Summary {
            expenses,
            period,
            today,
            json,
        } => {
            let today = commands::parse_today(today.as_deref())?;
            commands::cmd_summary(&config, &expenses, &period, today, json)
        }
        Commands::Serve { port, host } => commands::cmd_serve(config, &host, port).await,
    }
}
