use crate::catalog::{Catalog, reconcile};
use crate::collectors::Collector;
use crate::inventory::{BaselineRecord, CaptureRecord, InventoryRecord, StaticRecord};
use crate::layout::OutputLayout;
use crate::schema_loader::validate_inventory;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load one inventory artifact.
///
/// A missing file yields an empty inventory. Unreadable, unparseable or
/// schema-invalid files are errors that name the artifact.
pub fn load_inventory<R: InventoryRecord>(path: &Path) -> Result<Vec<R>> {
    let collector = R::COLLECTOR;
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                inventory = collector.as_str(),
                path = %path.display(),
                "inventory not found; treating as empty"
            );
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("reading {} inventory {}", collector.as_str(), path.display())
            });
        }
    };

    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing {} inventory {}", collector.as_str(), path.display()))?;
    validate_inventory(collector, &value)
        .with_context(|| format!("validating {} inventory {}", collector.as_str(), path.display()))?;
    let records: Vec<R> = serde_json::from_value(value).with_context(|| {
        format!("decoding {} inventory {}", collector.as_str(), path.display())
    })?;

    info!(
        inventory = collector.as_str(),
        records = records.len(),
        "loaded inventory"
    );
    Ok(records)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryPaths {
    pub baseline: PathBuf,
    pub capture: PathBuf,
    pub statics: PathBuf,
}

impl InventoryPaths {
    pub fn from_layout(layout: &OutputLayout) -> Self {
        Self {
            baseline: layout.inventory(Collector::Baseline),
            capture: layout.inventory(Collector::Capture),
            statics: layout.inventory(Collector::Static),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The three fully materialized inventories for one merge run.
pub struct Inventories {
    pub baseline: Vec<BaselineRecord>,
    pub capture: Vec<CaptureRecord>,
    pub statics: Vec<StaticRecord>,
}

impl Inventories {
    /// Load all three inventories; any malformed artifact aborts the load.
    pub fn load(paths: &InventoryPaths) -> Result<Self> {
        Ok(Self {
            baseline: load_inventory(&paths.baseline)?,
            capture: load_inventory(&paths.capture)?,
            statics: load_inventory(&paths.statics)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty() && self.capture.is_empty() && self.statics.is_empty()
    }

    pub fn reconcile(&self) -> Catalog {
        reconcile(&self.baseline, &self.capture, &self.statics)
    }
}
