//! Interactive workspace: a readline loop over a workspace engine session.
//!
//! User input is turned into engine commands; engine events are printed
//! through the readline `SharedWriter` so they never garble the prompt line.

use std::io::Write;

use anyhow::{Result, anyhow};
use console::style;
use rustyline_async::{Readline, ReadlineEvent, SharedWriter};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use artisan_core::history::HistoryStore;
use artisan_core::template::find_template;
use artisan_core::workspace::{WorkspaceEngine, WorkspaceHandle};
use artisan_infra::filesystem::write_export;
use artisan_types::error::WorkspaceError;
use artisan_types::workspace::{WorkspaceEntry, WorkspaceEvent};

use super::render::{render_snapshot, status_label};
use super::repl_commands::{self, ReplCommand};
use crate::state::AppState;

const PROMPT: &str = "artisan> ";

/// Whether the loop keeps reading after a command.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// Resolve where a session starts from the CLI arguments.
async fn resolve_entry(
    state: &AppState,
    idea: Option<String>,
    template: Option<u32>,
    history: Option<Uuid>,
) -> Result<WorkspaceEntry> {
    if let Some(id) = template {
        let template = find_template(id).ok_or_else(|| anyhow!("no template with id {id}"))?;
        return Ok(WorkspaceEntry::FromTemplate(template));
    }
    if let Some(id) = history {
        let record = state
            .history
            .get(&id)
            .await?
            .ok_or_else(|| anyhow!("no saved prompt with id {id}"))?;
        return Ok(WorkspaceEntry::FromHistory(record));
    }
    Ok(idea.map(WorkspaceEntry::Seed).unwrap_or_default())
}

/// One-line notice for an engine event, if it is worth showing.
fn describe_event(event: &WorkspaceEvent) -> Option<String> {
    let line = match event {
        WorkspaceEvent::IdeaProcessingStarted => {
            format!("  {} Expanding idea...", style("…").yellow())
        }
        WorkspaceEvent::IdeaProcessed => format!(
            "  {} Prompt drafted. {} to view it.",
            style("✓").green().bold(),
            style("/show").cyan()
        ),
        WorkspaceEvent::SuggestionsUpdated => format!(
            "  {} Suggestions ready. {} to pick one.",
            style("i").blue().bold(),
            style("/use <field> <n>").cyan()
        ),
        WorkspaceEvent::GhostUpdated { text } if !text.is_empty() => format!(
            "  {} {}  {}",
            style("ghost:").magenta(),
            style(text).magenta().dim(),
            style("(/accept)").dim()
        ),
        WorkspaceEvent::RefineStarted => format!("  {} Refining...", style("…").yellow()),
        WorkspaceEvent::RefineCompleted { count } => format!(
            "  {} {count} refinement{} ready. {} to view them.",
            style("✓").green().bold(),
            if *count == 1 { "" } else { "s" },
            style("/show").cyan()
        ),
        WorkspaceEvent::IdeaProcessingFailed { message }
        | WorkspaceEvent::RefineFailed { message } => {
            format!("  {} {message}", style("✗").red().bold())
        }
        WorkspaceEvent::Saved { history_id } => {
            style(format!("  saved ({history_id})")).dim().to_string()
        }
        _ => return None,
    };
    Some(line)
}

/// Run one parsed command against the session.
async fn execute(
    handle: &WorkspaceHandle,
    command: ReplCommand,
    out: &mut SharedWriter,
) -> Result<Flow, WorkspaceError> {
    match command {
        ReplCommand::Idea(idea) => {
            handle.set_idea(idea).await?;
            handle.process_idea().await?;
        }
        ReplCommand::Process => handle.process_idea().await?,
        ReplCommand::Set(field, value) => handle.set_field(field, value).await?,
        ReplCommand::Use(field, n) => handle.apply_suggestion(field, n - 1).await?,
        ReplCommand::Accept => handle.accept_ghost().await?,
        ReplCommand::Refine => handle.request_refine().await?,
        ReplCommand::Apply(n) => handle.apply_refinement_item(n - 1).await?,
        ReplCommand::Show => {
            let snapshot = handle.snapshot().await?;
            let _ = writeln!(out, "{}", render_snapshot(&snapshot));
        }
        ReplCommand::Export(None) => {
            let snapshot = handle.snapshot().await?;
            let _ = writeln!(out, "{}", snapshot.export_text());
        }
        ReplCommand::Export(Some(path)) => {
            let snapshot = handle.snapshot().await?;
            match write_export(path.as_ref(), &snapshot.export_text()).await {
                Ok(()) => {
                    let _ = writeln!(out, "  {} Wrote {path}", style("✓").green().bold());
                }
                Err(e) => {
                    let _ = writeln!(out, "  {} Could not write {path}: {e}", style("✗").red().bold());
                }
            }
        }
        ReplCommand::Dismiss => handle.dismiss_error().await?,
        ReplCommand::Help => {
            let _ = writeln!(out, "{}", repl_commands::help_text());
        }
        ReplCommand::Exit => return Ok(Flow::Exit),
        ReplCommand::Invalid(message) => {
            let _ = writeln!(out, "  {} {message}", style("!").yellow().bold());
        }
    }
    Ok(Flow::Continue)
}

/// Start an interactive workspace session.
pub async fn run_workspace(
    state: &AppState,
    idea: Option<String>,
    template: Option<u32>,
    history: Option<Uuid>,
) -> Result<()> {
    let entry = resolve_entry(state, idea, template, history).await?;
    let assist = state.assist_gateway()?;

    let handle = WorkspaceEngine::spawn(
        entry,
        assist,
        state.history.clone(),
        state.config.workspace.clone(),
    );

    let (mut input, mut out) = Readline::new(PROMPT.to_string())?;

    let initial = handle.snapshot().await?;
    let _ = writeln!(
        out,
        "\n  {} Prompt workspace  idea {}  {}",
        style("✦").cyan().bold(),
        status_label(initial.idea_status),
        style("/help for commands").dim()
    );
    if !initial.composed.is_empty() {
        let _ = writeln!(out, "{}", render_snapshot(&initial));
    }

    let mut events = handle.subscribe();
    let mut event_out = out.clone();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = describe_event(&event) {
                        let _ = writeln!(event_out, "{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "event printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    loop {
        let line = match input.readline().await {
            Ok(ReadlineEvent::Line(line)) => line,
            Ok(ReadlineEvent::Eof) | Ok(ReadlineEvent::Interrupted) => break,
            Err(e) => {
                tracing::warn!(error = %e, "readline failed");
                break;
            }
        };
        let _ = input.add_history_entry(line.clone());

        let Some(command) = repl_commands::parse(&line) else {
            continue;
        };
        match execute(&handle, command, &mut out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(WorkspaceError::Closed) => break,
            Err(e) => {
                let _ = writeln!(out, "  {} {e}", style("!").yellow().bold());
            }
        }
    }

    let last = handle.snapshot().await.ok();
    handle.close().await;
    printer.abort();
    let _ = input.flush();

    if let Some(id) = last.and_then(|s| s.history_id) {
        println!("  {} Saved as {}", style("✓").green().bold(), style(id).cyan());
    }
    println!();

    Ok(())
}
