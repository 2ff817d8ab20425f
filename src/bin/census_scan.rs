//! Scans a client source tree for endpoint literals into
//! `endpoints_static.json`.

use anyhow::{Result, bail};
use clap::Parser;
use endpoint_census::collectors::capture::DEFAULT_API_PREFIX;
use endpoint_census::collectors::static_scan::{DEFAULT_EXTENSIONS, ScanOptions, StaticScanner};
use endpoint_census::inventory::REFERENCE_CAP;
use endpoint_census::{Collector, OutputLayout, init_logging, split_list, write_inventory};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "census-scan")]
#[command(about = "Collect endpoint references from a source tree")]
struct Cli {
    /// Root of the source tree to scan.
    #[arg(long)]
    repo: PathBuf,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// API path prefix to look for.
    #[arg(long, default_value = DEFAULT_API_PREFIX)]
    prefix: String,
    /// File extensions to scan (comma or space separated).
    #[arg(long)]
    extensions: Option<String>,
    /// Reference sites kept per endpoint.
    #[arg(long, default_value_t = REFERENCE_CAP)]
    references: usize,
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
    if cli.references > REFERENCE_CAP {
        bail!("--references must be at most {REFERENCE_CAP}");
    }
    let layout = OutputLayout::resolve(cli.output_dir.as_deref());

    let extensions = match cli.extensions.as_deref().map(split_list) {
        Some(list) if !list.is_empty() => list,
        _ => DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    };
    let scanner = StaticScanner::new(ScanOptions {
        api_prefix: cli.prefix,
        extensions,
        reference_cap: cli.references,
    })?;

    info!(repo = %cli.repo.display(), "scanning");
    let outcome = scanner.scan(&cli.repo)?;
    if outcome.files_skipped > 0 {
        info!(skipped = outcome.files_skipped, "some files could not be read");
    }

    write_inventory(&layout, &outcome.records)?;
    println!(
        "Found {} potential endpoints in {}",
        outcome.records.len(),
        layout.inventory(Collector::Static).display()
    );
    Ok(())
}
