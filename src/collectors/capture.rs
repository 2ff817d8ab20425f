//! Capture inventory from recorded HTTP traffic.
//!
//! Traffic arrives as HAR recordings. Only requests on the API prefix (or
//! whose path mentions `websocket`) are counted. Requests are merged per
//! (method, canonical path) with a running count and the first few raw paths
//! kept as samples.

use crate::catalog::EndpointKey;
use crate::inventory::{CappedVec, CaptureRecord, Method, SAMPLE_CAP};
use crate::path::CanonicalPath;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_PREFIX: &str = "/api/v4";
pub const WEBSOCKET_MARKER: &str = "websocket";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Allow-list applied to raw request paths (query included).
pub struct CaptureFilter {
    prefix: String,
}

impl CaptureFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn admits(&self, raw_path: &str) -> bool {
        raw_path.starts_with(&self.prefix) || raw_path.contains(WEBSOCKET_MARKER)
    }
}

impl Default for CaptureFilter {
    fn default() -> Self {
        Self::new(DEFAULT_API_PREFIX)
    }
}

struct PendingCapture {
    key: EndpointKey,
    count: u64,
    samples: CappedVec<String>,
}

/// Running merge of observed requests.
pub struct CaptureAccumulator {
    filter: CaptureFilter,
    sample_cap: usize,
    index: HashMap<EndpointKey, usize>,
    pending: Vec<PendingCapture>,
}

impl CaptureAccumulator {
    pub fn new(filter: CaptureFilter, sample_cap: usize) -> Self {
        Self {
            filter,
            sample_cap,
            index: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Record one request; returns false when the allow-list rejects it.
    pub fn observe(&mut self, method: &str, raw_path: &str) -> bool {
        if !self.filter.admits(raw_path) {
            return false;
        }
        let key = EndpointKey::new(Method::new(method), CanonicalPath::new(raw_path));
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.pending.len();
                self.index.insert(key.clone(), slot);
                self.pending.push(PendingCapture {
                    key,
                    count: 0,
                    samples: CappedVec::new(self.sample_cap),
                });
                slot
            }
        };
        let pending = &mut self.pending[slot];
        pending.count += 1;
        pending.samples.push(raw_path.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Finished records, busiest first; ties keep first-seen order.
    pub fn into_records(self) -> Vec<CaptureRecord> {
        let mut records: Vec<CaptureRecord> = self
            .pending
            .into_iter()
            .map(|pending| CaptureRecord {
                method: pending.key.method,
                path: pending.key.path,
                count: pending.count,
                samples: pending.samples.into_vec(),
            })
            .collect();
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records
    }
}

impl Default for CaptureAccumulator {
    fn default() -> Self {
        Self::new(CaptureFilter::default(), SAMPLE_CAP)
    }
}

#[derive(Deserialize)]
struct Har {
    log: HarLog,
}

#[derive(Deserialize)]
struct HarLog {
    #[serde(default)]
    entries: Vec<Value>,
}

#[derive(Deserialize)]
struct HarEntry {
    request: HarRequest,
}

#[derive(Deserialize)]
struct HarRequest {
    method: String,
    url: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarSummary {
    pub entries: usize,
    pub admitted: usize,
    pub skipped: usize,
}

/// Feed every request of a HAR file into `acc`.
///
/// An unreadable or structurally invalid HAR file is an error; an individual
/// malformed entry is skipped with a warning.
pub fn collect_har(path: &Path, acc: &mut CaptureAccumulator) -> Result<HarSummary> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let har: Har =
        serde_json::from_str(&data).with_context(|| format!("parsing HAR {}", path.display()))?;

    let mut summary = HarSummary {
        entries: har.log.entries.len(),
        ..HarSummary::default()
    };
    for (idx, raw_entry) in har.log.entries.into_iter().enumerate() {
        let entry: HarEntry = match serde_json::from_value(raw_entry) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("{}: skipping entry {idx}: {err}", path.display());
                summary.skipped += 1;
                continue;
            }
        };
        let raw_path = request_path(&entry.request.url);
        if acc.observe(&entry.request.method, &raw_path) {
            summary.admitted += 1;
        }
    }
    Ok(summary)
}

/// Path plus query of a request URL (`https://host/a?b#c` → `/a?b`).
///
/// Inputs that are already relative are kept as-is minus any fragment.
pub fn request_path(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        },
        Err(_) => raw.split_once('#').map_or(raw, |(head, _)| head).to_string(),
    }
}
