//! Extracts declared operations from an OpenAPI document (or a directory of
//! path fragments) into `endpoints_baseline.json`.

use anyhow::Result;
use clap::Parser;
use endpoint_census::collectors::baseline;
use endpoint_census::layout::{StagedFile, write_inventory};
use endpoint_census::{Collector, OutputLayout, init_logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "census-baseline")]
#[command(about = "Collect declared endpoints from an OpenAPI specification")]
struct Cli {
    /// OpenAPI document, or a directory of YAML path fragments.
    input: PathBuf,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Also write a Markdown API reference to this file.
    #[arg(long)]
    reference: Option<PathBuf>,
    /// Heading used for the Markdown reference.
    #[arg(long, default_value = "API Reference")]
    reference_title: String,
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

    info!(input = %cli.input.display(), "parsing specification");
    let records = baseline::collect(&cli.input)?;
    write_inventory(&layout, &records)?;

    if let Some(reference) = &cli.reference {
        let markdown = baseline::render_reference(&cli.reference_title, &records);
        StagedFile::stage(reference, &markdown)?.commit()?;
    }

    println!(
        "Extracted {} endpoints to {}",
        records.len(),
        layout.inventory(Collector::Baseline).display()
    );
    Ok(())
}
