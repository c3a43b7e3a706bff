//! One-shot composition: expand an idea, optionally refine, print the result.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use uuid::Uuid;

use artisan_core::history::HistoryStore;
use artisan_core::workspace::WorkspaceEngine;
use artisan_infra::filesystem::write_export;
use artisan_types::config::WorkspaceConfig;
use artisan_types::history::SaveRequest;
use artisan_types::prompt::PromptElements;
use artisan_types::workspace::{TaskStatus, WorkspaceEntry, WorkspaceSnapshot};

use super::render::indent;
use crate::state::AppState;

/// Debounce delay for one-shot runs: long enough that neither timer fires
/// before the session closes.
const ONE_SHOT_DELAY_MS: u64 = 24 * 60 * 60 * 1000;

pub struct ComposeOptions {
    pub refine: bool,
    pub out: Option<PathBuf>,
    pub save: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ComposeOutput {
    idea: String,
    prompt: PromptElements,
    composed: String,
    refinements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history_id: Option<Uuid>,
}

fn one_shot_config(base: &WorkspaceConfig) -> WorkspaceConfig {
    WorkspaceConfig {
        autosave_delay_ms: ONE_SHOT_DELAY_MS,
        ghost_delay_ms: ONE_SHOT_DELAY_MS,
        ..base.clone()
    }
}

fn is_settled(status: TaskStatus) -> bool {
    matches!(status, TaskStatus::Ready | TaskStatus::Failed)
}

fn spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Expand `idea` into a prompt and print (or write) it.
pub async fn compose(state: &AppState, idea: &str, options: ComposeOptions) -> Result<()> {
    if idea.trim().is_empty() {
        bail!("Enter an idea first.");
    }

    let assist = state.assist_gateway()?;
    let handle = WorkspaceEngine::spawn(
        WorkspaceEntry::Seed(idea.to_string()),
        assist,
        state.history.clone(),
        one_shot_config(&state.config.workspace),
    );
    let mut watch = handle.watch();
    let hidden = options.json || options.quiet;

    let progress = spinner("Expanding idea...", hidden);
    let processed: WorkspaceSnapshot = watch.wait_for(|s| is_settled(s.idea_status)).await?.clone();
    progress.finish_and_clear();

    if processed.idea_status == TaskStatus::Failed {
        handle.close().await;
        bail!(
            "{}",
            processed
                .error
                .unwrap_or_else(|| "Could not process the idea.".to_string())
        );
    }

    if options.refine {
        handle.request_refine().await?;
        let progress = spinner("Refining...", hidden);
        let refined = watch.wait_for(|s| is_settled(s.refine_status)).await?.clone();
        progress.finish_and_clear();

        if refined.refine_status == TaskStatus::Failed {
            if let Some(message) = &refined.error {
                eprintln!("  {} {message}", style("!").yellow().bold());
            }
        }
    }

    let snapshot = handle.snapshot().await?;
    handle.close().await;

    let history_id = if options.save && !snapshot.composed.is_empty() {
        let id = state
            .history
            .save(&SaveRequest {
                id: snapshot.history_id,
                idea: snapshot.idea.clone(),
                prompt: snapshot.prompt.clone(),
            })
            .await?;
        Some(id)
    } else {
        None
    };

    if let Some(path) = &options.out {
        write_export(path, &snapshot.export_text()).await?;
    }

    if options.json {
        let output = ComposeOutput {
            idea: snapshot.idea,
            prompt: snapshot.prompt,
            composed: snapshot.composed,
            refinements: snapshot.refinements,
            history_id,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if options.quiet {
        if options.out.is_none() {
            println!("{}", snapshot.composed);
        }
        return Ok(());
    }

    println!();
    match &options.out {
        Some(path) => println!(
            "  {} Wrote prompt to {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        ),
        None => println!("{}", indent(&snapshot.composed)),
    }

    if !snapshot.refinements.is_empty() {
        println!();
        println!("  {}", style("Refinements:").bold());
        for item in &snapshot.refinements {
            println!("    - {item}");
        }
    }

    if let Some(id) = history_id {
        println!();
        println!(
            "  {} Saved. Reopen with: {}",
            style("✓").green().bold(),
            style(format!("artisan workspace --history {id}")).yellow()
        );
    }
    println!();

    Ok(())
}
