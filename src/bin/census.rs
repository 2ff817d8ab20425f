//! Top-level CLI that delegates to the `census-*` helper binaries.
//!
//! `census <command> [args]` resolves the matching helper next to this
//! executable (falling back to `PATH`) and forwards the remaining arguments
//! untouched, so each helper keeps its own flags and `--help`.

use anyhow::{Context, Result, anyhow, bail};
use endpoint_census::{Collector, resolve_helper_binary};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    run_helper(&cli)
}

struct Cli {
    command: CommandTarget,
    trailing_args: Vec<OsString>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CommandTarget {
    Collect(Collector),
    Merge,
    Normalize,
}

impl CommandTarget {
    fn helper_name(self) -> &'static str {
        match self {
            CommandTarget::Collect(collector) => collector.helper_name(),
            CommandTarget::Merge => "census-merge",
            CommandTarget::Normalize => "census-normalize",
        }
    }
}

impl TryFrom<&str> for CommandTarget {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "merge" => Ok(CommandTarget::Merge),
            "normalize" => Ok(CommandTarget::Normalize),
            other => Collector::try_from(other)
                .map(CommandTarget::Collect)
                .map_err(|_| anyhow!("unknown command: {other}")),
        }
    }
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let Some(first) = args.next() else {
            usage(1);
        };
        let first = first
            .to_str()
            .ok_or_else(|| anyhow!("Invalid UTF-8 in argument"))?;
        if matches!(first, "--help" | "-h" | "help") {
            usage(0);
        }
        let command = CommandTarget::try_from(first)?;
        Ok(Self {
            command,
            trailing_args: args.collect(),
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: census <command> [args]\n\nCommands:\n  baseline <openapi.yaml|dir>   Collect declared endpoints from an OpenAPI spec.\n  capture <session.har>...      Collect observed endpoints from recorded traffic.\n  scan --repo <dir>             Collect endpoint references from a source tree.\n  merge                         Reconcile inventories into catalog, diff and report.\n  normalize [path]...           Print canonical templates for raw paths.\n\nCollectors and merge accept --output-dir (or CENSUS_OUTPUT_DIR); run 'census <command> --help' for details.\n\nExamples:\n  census baseline openapi/api-v4.yaml\n  census capture capture/session.har\n  census scan --repo ../mobile-app\n  census merge --top 50"
    );
    std::process::exit(code);
}

fn resolve_helper(name: &str) -> Result<PathBuf> {
    resolve_helper_binary(name).ok_or_else(|| {
        anyhow!("Unable to locate helper '{name}'. Install the census binaries side by side or add them to PATH.")
    })
}

fn run_helper(cli: &Cli) -> Result<()> {
    let helper_path = resolve_helper(cli.command.helper_name())?;
    let status = Command::new(&helper_path)
        .args(&cli.trailing_args)
        .status()
        .with_context(|| format!("Failed to execute {}", helper_path.display()))?;

    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        std::process::exit(code);
    }

    bail!("Helper terminated by signal")
}
