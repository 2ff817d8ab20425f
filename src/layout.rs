//! Output directory layout and atomic artifact writes.

use crate::collectors::Collector;
use crate::inventory::InventoryRecord;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

pub const OUTPUT_DIR_ENV: &str = "CENSUS_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const FINAL_CATALOG_FILE: &str = "endpoints_final.json";
pub const DIFF_FILE: &str = "diff_not_in_openapi.json";
pub const REPORT_FILE: &str = "priority_report.md";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// CLI flag, then `CENSUS_OUTPUT_DIR`, then `output/`.
    pub fn resolve(cli_override: Option<&Path>) -> Self {
        if let Some(path) = cli_override {
            return Self::new(path);
        }
        match env::var(OUTPUT_DIR_ENV) {
            Ok(value) if !value.is_empty() => Self::new(value),
            _ => Self::new(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn inventory(&self, collector: Collector) -> PathBuf {
        self.root.join(collector.inventory_file())
    }

    pub fn listing(&self, collector: Collector) -> PathBuf {
        self.root.join(collector.listing_file())
    }

    pub fn final_catalog(&self) -> PathBuf {
        self.root.join(FINAL_CATALOG_FILE)
    }

    pub fn diff(&self) -> PathBuf {
        self.root.join(DIFF_FILE)
    }

    pub fn report(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }
}

/// A file staged next to its destination; nothing is visible at the final
/// path until [`StagedFile::commit`].
pub struct StagedFile {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl StagedFile {
    pub fn stage(dest: &Path, contents: &str) -> Result<Self> {
        let dir = parent_dir(dest);
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("staging {}", dest.display()))?;
        temp.write_all(contents.as_bytes())
            .with_context(|| format!("writing {}", dest.display()))?;
        temp.flush()
            .with_context(|| format!("flushing {}", dest.display()))?;
        Ok(Self {
            temp,
            dest: dest.to_path_buf(),
        })
    }

    pub fn commit(self) -> Result<PathBuf> {
        let dest = self.dest;
        self.temp
            .persist(&dest)
            .map_err(|err| err.error)
            .with_context(|| format!("persisting {}", dest.display()))?;
        Ok(dest)
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Stage every file first, then move them into place. When a later move
/// fails, files already moved are restored to their previous contents (or
/// removed if they did not exist), so callers see all outputs or none.
pub fn write_all_atomic(files: &[(PathBuf, String)]) -> Result<Vec<PathBuf>> {
    let staged = files
        .iter()
        .map(|(dest, contents)| StagedFile::stage(dest, contents))
        .collect::<Result<Vec<_>>>()?;

    let mut committed: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());
    for file in staged {
        let previous = fs::read(&file.dest).ok();
        match file.commit() {
            Ok(dest) => committed.push((dest, previous)),
            Err(err) => {
                roll_back(&committed);
                return Err(err);
            }
        }
    }
    Ok(committed.into_iter().map(|(dest, _)| dest).collect())
}

fn roll_back(committed: &[(PathBuf, Option<Vec<u8>>)]) {
    for (dest, previous) in committed.iter().rev() {
        let restored = match previous {
            Some(bytes) => fs::write(dest, bytes),
            None => fs::remove_file(dest),
        };
        if let Err(err) = restored {
            warn!("could not roll back {}: {err}", dest.display());
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn to_json_document<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("serializing JSON document")?;
    json.push('\n');
    Ok(json)
}

/// Write a collector's JSON inventory and its sorted text listing.
pub fn write_inventory<R: InventoryRecord>(
    layout: &OutputLayout,
    records: &[R],
) -> Result<Vec<PathBuf>> {
    let collector = R::COLLECTOR;
    let json = to_json_document(records)?;

    let mut lines: Vec<String> = records.iter().map(R::listing_line).collect();
    lines.sort();
    lines.dedup();
    let mut listing = lines.join("\n");
    if !listing.is_empty() {
        listing.push('\n');
    }

    write_all_atomic(&[
        (layout.inventory(collector), json),
        (layout.listing(collector), listing),
    ])
}
