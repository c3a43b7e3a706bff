//! History commands: list and show saved prompts.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use uuid::Uuid;

use artisan_core::history::HistoryStore;

use super::render::render_elements;
use crate::state::AppState;

/// Format a timestamp relative to now ("3m ago", "2d ago").
fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - *dt).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// List saved prompts, most recent first.
pub async fn list_history(state: &AppState, limit: Option<usize>, json: bool) -> Result<()> {
    let mut records = state.history.list().await?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!(
            "  {} No saved prompts yet. Start one with: {}",
            style("i").blue().bold(),
            style("artisan workspace").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Idea").fg(Color::White),
        Cell::new("Preview").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    let now = Utc::now();
    for record in &records {
        let idea = if record.idea.chars().count() > 30 {
            format!("{}...", record.idea.chars().take(27).collect::<String>())
        } else {
            record.idea.clone()
        };

        table.add_row(vec![
            Cell::new(record.id).fg(Color::DarkGrey),
            Cell::new(idea).fg(Color::Cyan),
            Cell::new(record.preview()),
            Cell::new(format_relative_time(&record.updated_at, now)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} saved prompt{}",
        style(records.len()).bold(),
        if records.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show one saved prompt in full.
pub async fn show_history(state: &AppState, id: Uuid, json: bool) -> Result<()> {
    let record = state
        .history
        .get(&id)
        .await?
        .ok_or_else(|| anyhow!("no saved prompt with id {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Idea:").bold(), style(&record.idea).cyan());
    println!(
        "  {} {}  {} {}",
        style("Created:").bold(),
        record.created_at.format("%Y-%m-%d %H:%M"),
        style("Updated:").bold(),
        record.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!();
    println!("{}", render_elements(&record.prompt));
    println!();
    println!(
        "  {}",
        style(format!("Reopen with: artisan workspace --history {id}")).dim()
    );
    println!();

    Ok(())
}
