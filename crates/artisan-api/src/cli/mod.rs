//! CLI command definitions for the `artisan` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod compose;
pub mod history;
pub mod ideas;
pub mod render;
pub mod repl_commands;
pub mod templates;
pub mod workspace;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use uuid::Uuid;

/// Build structured AI prompts with live assistance.
#[derive(Parser)]
#[command(name = "artisan", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive prompt workspace.
    #[command(alias = "ws")]
    Workspace {
        /// Seed idea; processed right away when given.
        idea: Option<String>,

        /// Start from a built-in template.
        #[arg(long, conflicts_with_all = ["history", "idea"])]
        template: Option<u32>,

        /// Reopen a saved prompt by id.
        #[arg(long, conflicts_with = "idea")]
        history: Option<Uuid>,
    },

    /// Turn an idea into a prompt in one shot and print it.
    Compose {
        /// The idea to expand.
        idea: String,

        /// Also request refinements and list them.
        #[arg(long)]
        refine: bool,

        /// Write the prompt text to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Do not record the result in history.
        #[arg(long)]
        no_save: bool,
    },

    /// Brainstorm keywords around a theme to seed an idea.
    Ideas {
        /// Central theme to brainstorm around.
        theme: String,

        /// Keep these keywords (1-based, comma separated) as the idea.
        #[arg(short, long, value_delimiter = ',')]
        pick: Vec<usize>,

        /// Open a workspace seeded with the picked keywords.
        #[arg(long, requires = "pick")]
        open: bool,
    },

    /// Browse saved prompts.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Browse the built-in template catalog.
    Templates {
        #[command(subcommand)]
        action: TemplateCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved prompts, most recent first.
    #[command(alias = "ls")]
    List {
        /// Show at most this many entries.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one saved prompt in full.
    Show {
        /// History record id.
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List templates.
    #[command(alias = "ls")]
    List {
        /// Only show one category (business, creative, learning).
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one template in full.
    Show {
        /// Template id.
        id: u32,
    },
}
