#![allow(dead_code)]

use anyhow::{Result, bail};
use std::process::{Command, Output};

/// Run a command and fail with its stderr when it exits non-zero.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd.output()?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {}\nstdout: {}\nstderr: {}",
            cmd,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

/// A census helper invocation isolated from the caller's environment.
pub fn census_command(binary: &str) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_remove("CENSUS_OUTPUT_DIR").env("CENSUS_LOG", "warn");
    cmd
}
