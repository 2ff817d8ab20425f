//! Reconciles the three endpoint inventories and writes the outputs.
//!
//! Reads `endpoints_{baseline,capture,static}.json` from the output directory
//! (a missing file counts as empty), then writes `endpoints_final.json`,
//! `diff_not_in_openapi.json` and `priority_report.md`. If any inventory is
//! malformed the run stops before writing anything.

use anyhow::Result;
use clap::Parser;
use endpoint_census::report::{DEFAULT_TITLE, DEFAULT_TOP};
use endpoint_census::{
    Inventories, InventoryPaths, OutputLayout, ReportArtifacts, ReportOptions, init_logging,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "census-merge")]
#[command(about = "Reconcile endpoint inventories into a prioritized catalog")]
struct Cli {
    /// Directory holding the inventories and receiving the outputs.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Override the baseline inventory path.
    #[arg(long)]
    baseline: Option<PathBuf>,
    /// Override the capture inventory path.
    #[arg(long)]
    capture: Option<PathBuf>,
    /// Override the static-scan inventory path.
    #[arg(long = "static")]
    statics: Option<PathBuf>,
    /// Rows in the report's priority table.
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,
    /// Report heading.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let layout = OutputLayout::resolve(cli.output_dir.as_deref());

    let mut paths = InventoryPaths::from_layout(&layout);
    if let Some(path) = cli.baseline {
        paths.baseline = path;
    }
    if let Some(path) = cli.capture {
        paths.capture = path;
    }
    if let Some(path) = cli.statics {
        paths.statics = path;
    }

    let inventories = Inventories::load(&paths)?;
    let catalog = inventories.reconcile();
    let options = ReportOptions {
        title: cli.title,
        top: cli.top,
    };
    let artifacts = ReportArtifacts::render(&catalog, &options)?;
    artifacts.write(&layout)?;

    info!(
        endpoints = catalog.len(),
        undocumented = catalog.undocumented().len(),
        "catalog written"
    );
    println!("Generated report at {}", layout.report().display());
    Ok(())
}
