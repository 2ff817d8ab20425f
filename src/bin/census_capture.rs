//! Folds HAR recordings into `endpoints_capture.json`.

use anyhow::{Result, bail};
use clap::Parser;
use endpoint_census::collectors::capture::{
    CaptureAccumulator, CaptureFilter, DEFAULT_API_PREFIX, collect_har,
};
use endpoint_census::inventory::SAMPLE_CAP;
use endpoint_census::{Collector, OutputLayout, init_logging, write_inventory};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "census-capture")]
#[command(about = "Collect observed endpoints from recorded HTTP traffic")]
struct Cli {
    /// One or more HAR files.
    #[arg(required = true)]
    har: Vec<PathBuf>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Only requests under this prefix (or mentioning websocket) are kept.
    #[arg(long, default_value = DEFAULT_API_PREFIX)]
    prefix: String,
    /// Raw sample paths kept per endpoint.
    #[arg(long, default_value_t = SAMPLE_CAP)]
    samples: usize,
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
    if cli.samples > SAMPLE_CAP {
        bail!("--samples must be at most {SAMPLE_CAP}");
    }
    let layout = OutputLayout::resolve(cli.output_dir.as_deref());

    let mut acc = CaptureAccumulator::new(CaptureFilter::new(cli.prefix.as_str()), cli.samples);
    for har in &cli.har {
        let summary = collect_har(har, &mut acc)?;
        info!(
            file = %har.display(),
            entries = summary.entries,
            admitted = summary.admitted,
            skipped = summary.skipped,
            "read recording"
        );
    }

    if acc.is_empty() {
        warn!(prefix = %cli.prefix, "no recorded request matched the capture filter");
    }
    let records = acc.into_records();
    write_inventory(&layout, &records)?;
    println!(
        "Processed {} unique endpoints to {}",
        records.len(),
        layout.inventory(Collector::Capture).display()
    );
    Ok(())
}
