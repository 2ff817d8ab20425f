//! Reconciled endpoint catalog.
//!
//! The catalog unions the three inventories by [`EndpointKey`], recording
//! which sources mentioned each endpoint and an integer priority. Callers get
//! a [`Catalog`] back from [`reconcile`]; it is already sorted by priority and
//! is never mutated afterwards.

pub mod reconcile;

pub use reconcile::{CAPTURE_WEIGHT, STATIC_MATCH_BONUS, STATIC_ONLY_PRIORITY, reconcile};

use crate::inventory::{Method, Source};
use crate::path::CanonicalPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identity of one catalog entry: method (or `ANY`) plus canonical path.
pub struct EndpointKey {
    pub method: Method,
    pub path: CanonicalPath,
}

impl EndpointKey {
    pub fn new(method: Method, path: CanonicalPath) -> Self {
        Self { method, path }
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub method: Method,
    pub path: CanonicalPath,
    pub sources: BTreeSet<Source>,
    pub priority: u64,
}

impl CatalogEntry {
    pub(crate) fn new(key: EndpointKey) -> Self {
        Self {
            method: key.method,
            path: key.path,
            sources: BTreeSet::new(),
            priority: 0,
        }
    }

    pub fn key(&self) -> EndpointKey {
        EndpointKey::new(self.method.clone(), self.path.clone())
    }

    pub fn has_source(&self, source: Source) -> bool {
        self.sources.contains(&source)
    }

    /// Seen in live traffic but never declared in the specification.
    pub fn is_undocumented(&self) -> bool {
        self.has_source(Source::Capture) && !self.has_source(Source::Openapi)
    }

    /// Comma-joined source tags in merge order.
    pub fn source_list(&self) -> String {
        self.sources
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Catalog entries sorted by descending priority.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub(crate) fn from_sorted(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, method: &str, path: &str) -> Option<&CatalogEntry> {
        let method = Method::new(method);
        let path = CanonicalPath::new(path);
        self.entries
            .iter()
            .find(|entry| entry.method == method && entry.path == path)
    }

    /// The top `limit` entries by priority.
    pub fn top(&self, limit: usize) -> &[CatalogEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Entries captured in practice but absent from the specification, in
    /// catalog order.
    pub fn undocumented(&self) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_undocumented())
            .collect()
    }
}
