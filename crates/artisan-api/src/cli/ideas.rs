//! Keyword brainstorming around a theme, optionally seeding a workspace.

use std::time::Duration;

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::state::AppState;

/// Separator used when selected keywords become a workspace idea.
const SEED_SEPARATOR: &str = ", ";

pub struct IdeasOptions {
    /// 1-based positions of the keywords to keep.
    pub pick: Vec<usize>,
    pub open: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct IdeasOutput<'a> {
    theme: &'a str,
    keywords: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<&'a str>,
}

/// Join the picked keywords into an idea, in the order they were picked.
/// Repeated positions count once.
fn seed_from_picks(keywords: &[String], picks: &[usize]) -> Result<String> {
    let mut chosen: Vec<&str> = Vec::new();
    let mut seen = Vec::new();
    for &n in picks {
        let Some(keyword) = n.checked_sub(1).and_then(|i| keywords.get(i)) else {
            bail!(
                "no keyword at position {n} (choose 1-{})",
                keywords.len()
            );
        };
        if !seen.contains(&n) {
            seen.push(n);
            chosen.push(keyword.as_str());
        }
    }
    Ok(chosen.join(SEED_SEPARATOR))
}

/// Generate keywords for `theme`, print them, and open a workspace seeded
/// with the picked ones when asked.
pub async fn brainstorm(state: &AppState, theme: &str, options: IdeasOptions) -> Result<()> {
    let theme = theme.trim();
    if theme.is_empty() {
        bail!("Enter a theme first.");
    }

    let assist = state.assist_gateway()?;

    let spinner = if options.json || options.quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Brainstorming around \"{theme}\"..."));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    };
    let result = assist.idea_keywords(theme).await;
    spinner.finish_and_clear();
    let keywords = result?;

    let seed = if options.pick.is_empty() {
        None
    } else {
        Some(seed_from_picks(&keywords, &options.pick)?)
    };

    if options.json {
        let output = IdeasOutput {
            theme,
            keywords: &keywords,
            seed: seed.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if options.quiet {
        match &seed {
            Some(seed) if !options.open => println!("{seed}"),
            Some(_) => {}
            None => {
                for keyword in &keywords {
                    println!("{keyword}");
                }
            }
        }
    } else {
        println!();
        println!("  {} {}", style("✦").cyan().bold(), style(theme).bold());
        for (i, keyword) in keywords.iter().enumerate() {
            let marker = if options.pick.contains(&(i + 1)) {
                style("●").green().to_string()
            } else {
                style("○").dim().to_string()
            };
            println!("  {marker} {:>2}. {keyword}", i + 1);
        }
        println!();
        match &seed {
            Some(seed) => println!("  {} {seed}", style("Idea:").bold()),
            None => println!(
                "  {}",
                style("Pick keywords with --pick 1,3 and add --open to start a workspace.").dim()
            ),
        }
        println!();
    }

    if options.open {
        if let Some(seed) = seed {
            tracing::debug!(%seed, "opening workspace from picked keywords");
            super::workspace::run_workspace(state, Some(seed), None, None).await?;
        }
    }

    Ok(())
}
