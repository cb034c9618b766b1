//! plannergantt CLI - Planner export to Gantt chart
//!
//! Command-line interface for loading a Microsoft Planner export (CSV/XLSX)
//! and rendering an interactive HTML Gantt chart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use plannergantt_core::annotate::Annotator;
use plannergantt_core::{Plan, Renderer};
use plannergantt_loader::load_tasks;
use plannergantt_render::HtmlGanttRenderer;

#[derive(Parser)]
#[command(name = "plannergantt")]
#[command(author, version, about = "Render a Gantt chart from a Planner export (CSV or XLSX)", long_about = None)]
struct Cli {
    /// Path to the Planner export (CSV or XLSX)
    #[arg(
        long = "input",
        visible_alias = "csv",
        value_name = "PATH",
        default_value = "input.csv"
    )]
    input: PathBuf,

    /// Destination HTML file for the chart
    #[arg(long, value_name = "PATH", default_value = "gantt.html")]
    output: PathBuf,

    /// Overrides the chart title (defaults to the input filename)
    #[arg(long)]
    title: Option<String>,

    /// Remove buckets matching a glob pattern (repeatable)
    #[arg(long = "exclude-bucket", value_name = "GLOB")]
    exclude_bucket: Vec<String>,

    /// Render with the dark theme
    #[arg(long)]
    dark: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let tasks = load_tasks(&cli.input, &cli.exclude_bucket)?;
    tracing::debug!(rows = tasks.len(), "normalized task table ready");

    let title = cli
        .title
        .clone()
        .unwrap_or_else(|| default_title(&cli.input));
    let plan = Plan::new(title).with_tasks(tasks);
    let annotations = Annotator::new().annotate(&plan);

    let mut renderer = HtmlGanttRenderer::new();
    if cli.dark {
        renderer = renderer.dark_theme();
    }
    let html = renderer.render(&plan, &annotations)?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(&cli.output, html)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    let resolved = cli.output.canonicalize().unwrap_or(cli.output);
    println!("Wrote Gantt chart to {}", resolved.display());
    Ok(())
}

/// Chart title fallback: the input filename stem
fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Planner Tasks Timeline".to_string())
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_defaults_to_input_stem() {
        assert_eq!(default_title(Path::new("exports/q1_tasks.csv")), "q1_tasks");
        assert_eq!(default_title(Path::new("board.xlsx")), "board");
    }

    #[test]
    fn title_falls_back_when_stem_is_unusable() {
        assert_eq!(default_title(Path::new("")), "Planner Tasks Timeline");
    }
}
