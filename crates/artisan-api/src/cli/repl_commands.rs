//! Slash command parsing for the interactive workspace.
//!
//! A line that does not start with `/` is taken as a new idea and processed
//! right away.

use console::style;

use artisan_types::prompt::PromptField;

/// Commands understood by the workspace REPL.
#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    /// Set the idea and expand it.
    Idea(String),
    /// Re-run idea processing on the current idea.
    Process,
    /// Replace a field's text.
    Set(PromptField, String),
    /// Append the n-th (1-based) suggestion for a field.
    Use(PromptField, usize),
    /// Accept the ghost suggestion.
    Accept,
    /// Ask for refinements.
    Refine,
    /// Append the n-th (1-based) refinement to details.
    Apply(usize),
    /// Print the current state.
    Show,
    /// Print or write the export text.
    Export(Option<String>),
    /// Clear the error banner.
    Dismiss,
    Help,
    Exit,
    /// Unrecognized or malformed input; carries a message for the user.
    Invalid(String),
}

fn parse_index(raw: Option<&str>, usage: &str) -> Result<usize, String> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| format!("usage: {usage}"))
}

/// Parse one line of REPL input. Returns `None` for a blank line.
pub fn parse(input: &str) -> Option<ReplCommand> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.starts_with('/') {
        return Some(ReplCommand::Idea(trimmed.to_string()));
    }

    let (cmd, rest) = match trimmed.split_once(' ') {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };
    let rest = (!rest.is_empty()).then_some(rest);

    let command = match cmd.as_str() {
        "/idea" => match rest {
            Some(idea) => ReplCommand::Idea(idea.to_string()),
            None => ReplCommand::Invalid("usage: /idea <text>".to_string()),
        },
        "/process" | "/go" => ReplCommand::Process,
        "/set" => {
            let Some((field, value)) = rest.and_then(|r| r.split_once(' ')) else {
                return Some(ReplCommand::Invalid("usage: /set <field> <text>".to_string()));
            };
            match field.parse::<PromptField>() {
                Ok(field) => ReplCommand::Set(field, value.trim().replace("\\n", "\n")),
                Err(e) => ReplCommand::Invalid(e),
            }
        }
        "/clear" => match rest.map(str::parse::<PromptField>) {
            Some(Ok(field)) => ReplCommand::Set(field, String::new()),
            Some(Err(e)) => ReplCommand::Invalid(e),
            None => ReplCommand::Invalid("usage: /clear <field>".to_string()),
        },
        "/use" => {
            let mut parts = rest.unwrap_or_default().split_whitespace();
            let field = parts.next().map(str::parse::<PromptField>);
            let index = parse_index(parts.next(), "/use <field> <n>");
            match (field, index) {
                (Some(Ok(field)), Ok(n)) => ReplCommand::Use(field, n),
                (Some(Err(e)), _) => ReplCommand::Invalid(e),
                _ => ReplCommand::Invalid("usage: /use <field> <n>".to_string()),
            }
        }
        "/accept" | "/a" => ReplCommand::Accept,
        "/refine" | "/r" => ReplCommand::Refine,
        "/apply" => match parse_index(rest, "/apply <n>") {
            Ok(n) => ReplCommand::Apply(n),
            Err(e) => ReplCommand::Invalid(e),
        },
        "/show" | "/s" => ReplCommand::Show,
        "/export" => ReplCommand::Export(rest.map(str::to_string)),
        "/dismiss" => ReplCommand::Dismiss,
        "/help" | "/h" | "/?" => ReplCommand::Help,
        "/exit" | "/quit" | "/q" => ReplCommand::Exit,
        other => ReplCommand::Invalid(format!("unknown command: {other}")),
    };
    Some(command)
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("<text>", "Use the line as the idea and expand it"),
        ("/process", "Expand the current idea again"),
        ("/set <field> <text>", "Replace a field (\\n for a newline)"),
        ("/clear <field>", "Empty a field"),
        ("/use <field> <n>", "Append suggestion n to a field"),
        ("/accept", "Accept the ghost suggestion"),
        ("/refine", "Ask for refinements"),
        ("/apply <n>", "Append refinement n to details"),
        ("/show", "Show the workspace"),
        ("/export [path]", "Print the prompt, or write it to a file"),
        ("/dismiss", "Clear the error message"),
        ("/exit", "Leave the workspace"),
    ];

    let mut lines = vec![String::new(), format!("  {}", style("Available commands:").bold()), String::new()];
    for (cmd, desc) in rows {
        lines.push(format!("  {:<22} {desc}", style(cmd).cyan()));
    }
    lines.push(String::new());
    lines.push(format!(
        "  {}",
        style("Fields: role, purpose, constraints, details. Ctrl+D to exit.").dim()
    ));
    lines.push(String::new());
    lines.join("\n")
}
