//! Collector registry.
//!
//! Each collector turns one raw discovery source into a typed inventory:
//! the interface specification (`baseline`), recorded live traffic
//! (`capture`), or a source-tree scan (`static`). This module centralizes the
//! names, helper binaries and artifact file names so binaries do not hard-code
//! them. Collectors are independent: none reads another's output, so they may
//! run in any order.

pub mod baseline;
pub mod capture;
pub mod static_scan;

use anyhow::{Result, bail};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collector {
    Baseline,
    Capture,
    Static,
}

impl Collector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collector::Baseline => "baseline",
            Collector::Capture => "capture",
            Collector::Static => "static",
        }
    }

    pub fn helper_name(&self) -> &'static str {
        match self {
            Collector::Baseline => "census-baseline",
            Collector::Capture => "census-capture",
            Collector::Static => "census-scan",
        }
    }

    /// JSON inventory written under the output directory.
    pub fn inventory_file(&self) -> String {
        format!("endpoints_{}.json", self.as_str())
    }

    /// Sorted `METHOD path` companion listing.
    pub fn listing_file(&self) -> String {
        format!("endpoints_{}.txt", self.as_str())
    }
}

impl TryFrom<&str> for Collector {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "baseline" | "openapi" => Ok(Collector::Baseline),
            "capture" => Ok(Collector::Capture),
            "static" | "scan" => Ok(Collector::Static),
            other => bail!(
                "Unknown collector: {other} (expected one of: {})",
                collector_names().join(", ")
            ),
        }
    }
}

/// Collectors in merge order.
pub const COLLECTORS: &[Collector] = &[Collector::Baseline, Collector::Capture, Collector::Static];

pub fn collector_names() -> Vec<&'static str> {
    COLLECTORS.iter().map(Collector::as_str).collect()
}
