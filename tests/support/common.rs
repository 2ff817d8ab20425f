#![allow(dead_code)]

use anyhow::Result;
use endpoint_census::{
    BaselineRecord, CanonicalPath, CaptureRecord, Collector, Method, OutputLayout, Reference,
    StaticRecord,
};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A 26-character lowercase alphanumeric id, the shape of generated ids.
pub const USER_ID: &str = "4xp9fdt4pbgd1kzsgqbehxnf8e";
pub const UUID: &str = "6f1d3c6e-2b4a-4c1e-9f0a-8d7e6c5b4a39";

pub fn baseline(method: &str, path: &str) -> BaselineRecord {
    BaselineRecord {
        method: Method::new(method),
        path: CanonicalPath::new(path),
        original_path: path.to_string(),
        source_document: "openapi.yaml".to_string(),
        summary: None,
        operation_id: None,
    }
}

pub fn capture(method: &str, raw_path: &str, count: u64) -> CaptureRecord {
    CaptureRecord {
        method: Method::new(method),
        path: CanonicalPath::new(raw_path),
        count,
        samples: vec![raw_path.to_string()],
    }
}

pub fn found(path: &str, file: &str, line: u64) -> StaticRecord {
    StaticRecord {
        path: CanonicalPath::new(path),
        references: vec![Reference {
            file: file.to_string(),
            line,
        }],
    }
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Write the given inventories (as JSON values) under `layout`; `None` leaves
/// that artifact absent.
pub fn seed_inventories(
    layout: &OutputLayout,
    baseline: Option<Value>,
    capture: Option<Value>,
    statics: Option<Value>,
) -> Result<()> {
    for (collector, value) in [
        (Collector::Baseline, baseline),
        (Collector::Capture, capture),
        (Collector::Static, statics),
    ] {
        if let Some(value) = value {
            write_json(&layout.inventory(collector), &value)?;
        }
    }
    Ok(())
}

/// (method, path, priority) triples in catalog order.
pub fn keyed_priorities(catalog: &Value) -> Vec<(String, String, u64)> {
    catalog
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    (
                        entry["method"].as_str().unwrap_or_default().to_string(),
                        entry["path"].as_str().unwrap_or_default().to_string(),
                        entry["priority"].as_u64().unwrap_or_default(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
