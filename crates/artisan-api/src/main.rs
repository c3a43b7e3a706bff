//! Prompt Artisan CLI entry point.
//!
//! Binary name: `artisan`
//!
//! Parses CLI arguments, sets up tracing, initializes state and dispatches to
//! the command handlers.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, HistoryCommand, TemplateCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,artisan_core=debug,artisan_infra=debug",
        _ => "trace",
    };
    if let Err(e) = artisan_observe::init_tracing(filter, cli.otel) {
        eprintln!("Warning: tracing setup failed: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "artisan", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    artisan_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;

    match cli.command {
        Commands::Workspace {
            idea,
            template,
            history,
        } => {
            cli::workspace::run_workspace(&state, idea, template, history).await?;
        }

        Commands::Compose {
            idea,
            refine,
            out,
            no_save,
        } => {
            let options = cli::compose::ComposeOptions {
                refine,
                out,
                save: !no_save,
                json: cli.json,
                quiet: cli.quiet,
            };
            cli::compose::compose(&state, &idea, options).await?;
        }

        Commands::Ideas { theme, pick, open } => {
            let options = cli::ideas::IdeasOptions {
                pick,
                open,
                json: cli.json,
                quiet: cli.quiet,
            };
            cli::ideas::brainstorm(&state, &theme, options).await?;
        }

        Commands::History { action } => match action {
            HistoryCommand::List { limit } => {
                cli::history::list_history(&state, limit, cli.json).await?;
            }
            HistoryCommand::Show { id } => {
                cli::history::show_history(&state, id, cli.json).await?;
            }
        },

        Commands::Templates { action } => match action {
            TemplateCommand::List { category } => {
                cli::templates::list_templates(category.as_deref(), cli.json)?;
            }
            TemplateCommand::Show { id } => {
                cli::templates::show_template(id, cli.json)?;
            }
        },

        Commands::Completions { .. } => {}
    }

    Ok(())
}
