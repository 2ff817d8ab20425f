//! Prints the canonical template for each path argument (or stdin line).
//!
//! Usage:
//!   census-normalize /api/v4/users/4xp9fdt4pbgd1kzsgqbehxnf8e?page=1
//!   cat paths.txt | census-normalize

use anyhow::{Context, Result};
use clap::Parser;
use endpoint_census::normalize;
use std::io::{BufRead, Write, stdin, stdout};

#[derive(Parser, Debug)]
#[command(name = "census-normalize")]
#[command(about = "Normalize raw request paths into canonical templates")]
struct Cli {
    /// Raw paths; reads one per line from stdin when omitted.
    paths: Vec<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut out = stdout().lock();

    if !cli.paths.is_empty() {
        for raw in &cli.paths {
            writeln!(out, "{}", normalize(raw))?;
        }
        return Ok(());
    }

    for line in stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        writeln!(out, "{}", normalize(trimmed))?;
    }
    Ok(())
}
