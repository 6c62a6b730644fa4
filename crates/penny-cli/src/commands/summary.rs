//! Summary command implementation

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use penny_core::summary::summarize;
use penny_core::{AssistantConfig, Period, SpendingSummary, SummaryKind};

use super::load_expenses;

/// Build the summary for `period` from an expenses file
pub fn build_summary(
    config: &AssistantConfig,
    expenses_path: &Path,
    period: &str,
    today: NaiveDate,
) -> Result<SpendingSummary> {
    let period: Period = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let expenses = load_expenses(expenses_path)?;
    Ok(summarize(&expenses, period, today, &config.currency_symbol))
}

pub fn cmd_summary(
    config: &AssistantConfig,
    expenses_path: &Path,
    period: &str,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let summary = build_summary(config, expenses_path, period, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let icon = match summary.kind {
        SummaryKind::Tip => "💡",
        SummaryKind::Warning => "⚠️ ",
        SummaryKind::Recommendation => "🎯",
    };

    println!();
    println!("📊 Spending Summary ({})", summary.period);
    println!("   Period: {} to {}", summary.start_date, summary.end_date);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", summary.summary);

    if !summary.top_categories.is_empty() {
        println!();
        println!("   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%");
        println!("   ──────────────────────────┼──────────────┼────────");
        for cat in &summary.top_categories {
            let share = if summary.total_spent > 0.0 {
                cat.amount / summary.total_spent * 100.0
            } else {
                0.0
            };
            println!(
                "   {:25} │ {:>12} │ {:>5.1}%",
                cat.category,
                format!("{}{:.2}", config.currency_symbol, cat.amount),
                share
            );
        }
    }

    println!();
    println!("   {} {}", icon, summary.advice);
    println!("   {}", summary.trends);

    Ok(())
}
