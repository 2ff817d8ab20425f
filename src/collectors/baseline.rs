//! Baseline inventory from OpenAPI documents.
//!
//! Accepts either a single document with a `paths:` mapping (YAML or JSON) or
//! a directory of YAML fragments whose top-level keys are paths. A broken
//! fragment is skipped with a warning; a broken single document is fatal
//! because there is nothing left to collect.

use crate::inventory::{BaselineRecord, Method};
use crate::path::CanonicalPath;
use anyhow::{Context, Result, bail};
use serde_yaml::{Mapping, Value};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Operation keys recognized under a path item, lower-case.
pub const DECLARED_VERBS: &[&str] = &["get", "post", "put", "delete", "patch", "options", "head"];

const FRAGMENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

pub fn collect(input: &Path) -> Result<Vec<BaselineRecord>> {
    let mut records = if input.is_dir() {
        collect_fragments(input)?
    } else {
        collect_document(input)?
    };
    sort_records(&mut records);
    Ok(records)
}

/// Parse one OpenAPI document and emit a record per declared operation.
pub fn collect_document(path: &Path) -> Result<Vec<BaselineRecord>> {
    let doc = read_yaml(path)?;
    let Some(paths) = doc.get("paths").and_then(Value::as_mapping) else {
        bail!("{} has no 'paths' mapping", path.display());
    };
    Ok(records_from_paths(paths, &document_name(path), PathKeys::Document))
}

/// Parse every YAML fragment in `dir` (sorted by file name).
pub fn collect_fragments(dir: &Path) -> Result<Vec<BaselineRecord>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| FRAGMENT_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();
    debug!(files = files.len(), dir = %dir.display(), "processing fragments");

    let mut records = Vec::new();
    for file in files {
        let doc = match read_yaml(&file) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("skipping {}: {err:#}", file.display());
                continue;
            }
        };
        let Some(paths) = doc.as_mapping() else {
            continue;
        };
        records.extend(records_from_paths(
            paths,
            &document_name(&file),
            PathKeys::Fragment,
        ));
    }
    Ok(records)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PathKeys {
    /// Keys of an OpenAPI `paths` object; `x-` extensions are skipped.
    Document,
    /// Top-level keys of a fragment file; only keys starting with `/` count.
    Fragment,
}

fn records_from_paths(paths: &Mapping, source_document: &str, keys: PathKeys) -> Vec<BaselineRecord> {
    let mut records = Vec::new();
    for (raw_path, item) in paths {
        let Some(raw_path) = raw_path.as_str() else {
            continue;
        };
        let accepted = match keys {
            PathKeys::Document => !raw_path.starts_with("x-"),
            PathKeys::Fragment => raw_path.starts_with('/'),
        };
        if !accepted {
            continue;
        }
        let Some(operations) = item.as_mapping() else {
            continue;
        };
        let trimmed = raw_path.trim();
        for (verb, details) in operations {
            let Some(verb) = verb.as_str() else {
                continue;
            };
            if !DECLARED_VERBS.contains(&verb.to_ascii_lowercase().as_str()) {
                continue;
            }
            records.push(BaselineRecord {
                method: Method::new(verb),
                path: CanonicalPath::new(trimmed),
                original_path: raw_path.to_string(),
                source_document: source_document.to_string(),
                summary: string_field(details, "summary"),
                operation_id: string_field(details, "operationId"),
            });
        }
    }
    records
}

fn string_field(details: &Value, key: &str) -> Option<String> {
    details.get(key).and_then(Value::as_str).map(str::to_string)
}

fn read_yaml(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Deterministic (path, method) order.
pub fn sort_records(records: &mut [BaselineRecord]) {
    records.sort_by(|a, b| {
        a.path
            .as_str()
            .cmp(b.path.as_str())
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });
}

/// Markdown API reference: one row per declared operation.
pub fn render_reference(title: &str, records: &[BaselineRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}\n");
    let _ = writeln!(out, "Total endpoints found: {}\n", records.len());
    out.push_str("| Method | Path | Summary | Source |\n");
    out.push_str("| :--- | :--- | :--- | :--- |\n");
    for record in records {
        let _ = writeln!(
            out,
            "| {} | `{}` | {} | `{}` |",
            record.method,
            record.original_path,
            record.summary.as_deref().unwrap_or("No summary"),
            record.source_document
        );
    }
    out
}
