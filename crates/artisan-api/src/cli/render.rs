//! Styled terminal rendering shared by the workspace, compose, history and
//! template commands.

use console::style;

use artisan_core::prompt::compose_prompt;
use artisan_types::prompt::{PromptElements, PromptField, SuggestionSet};
use artisan_types::workspace::{TaskStatus, WorkspaceSnapshot};

/// Short colored label for a task status.
pub fn status_label(status: TaskStatus) -> String {
    match status {
        TaskStatus::Idle => style("idle").dim().to_string(),
        TaskStatus::Loading => style("working...").yellow().to_string(),
        TaskStatus::Ready => style("ready").green().to_string(),
        TaskStatus::Failed => style("failed").red().to_string(),
    }
}

/// Indent every line of `text` by two spaces.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the composed prompt for a set of elements, or a placeholder.
pub fn render_elements(elements: &PromptElements) -> String {
    let composed = compose_prompt(elements);
    if composed.is_empty() {
        style("  (empty prompt)").dim().to_string()
    } else {
        indent(&composed)
    }
}

fn render_suggestions(set: &SuggestionSet) -> Vec<String> {
    let mut lines = Vec::new();
    for field in [PromptField::Role, PromptField::Purpose, PromptField::Constraints] {
        let items = set.for_field(field);
        if items.is_empty() {
            continue;
        }
        lines.push(format!("  {}", style(field.label()).bold()));
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("    {} {item}", style(format!("[{}]", i + 1)).cyan()));
        }
    }
    lines
}

/// Full multi-line view of a workspace snapshot.
pub fn render_snapshot(snapshot: &WorkspaceSnapshot) -> String {
    let mut lines = Vec::new();

    lines.push(String::new());
    let idea = if snapshot.idea.trim().is_empty() {
        style("(none)").dim().to_string()
    } else {
        style(&snapshot.idea).cyan().to_string()
    };
    lines.push(format!("  {} {idea}", style("Idea:").bold()));
    lines.push(format!(
        "  {} idea {}  refine {}",
        style("Status:").bold(),
        status_label(snapshot.idea_status),
        status_label(snapshot.refine_status)
    ));
    if let Some(id) = snapshot.history_id {
        lines.push(format!("  {} {}", style("Saved as:").bold(), style(id).dim()));
    }

    lines.push(String::new());
    if snapshot.composed.is_empty() {
        lines.push(style("  (empty prompt)").dim().to_string());
    } else {
        lines.push(indent(&snapshot.composed));
    }

    if snapshot.has_ghost() {
        lines.push(String::new());
        lines.push(format!(
            "  {} {}",
            style("ghost (/accept):").magenta(),
            style(&snapshot.ghost_suggestion).magenta().dim()
        ));
    }

    if let Some(set) = &snapshot.suggestions {
        lines.push(String::new());
        lines.push(format!("  {}", style("Suggestions (/use <field> <n>):").bold()));
        lines.extend(render_suggestions(set));
    }

    if !snapshot.refinements.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", style("Refinements (/apply <n>):").bold()));
        for (i, item) in snapshot.refinements.iter().enumerate() {
            lines.push(format!("    {} {item}", style(format!("[{}]", i + 1)).cyan()));
        }
    }

    if let Some(error) = &snapshot.error {
        lines.push(String::new());
        lines.push(format!("  {} {error}", style("✗").red().bold()));
    }

    lines.push(String::new());
    lines.join("\n")
}
