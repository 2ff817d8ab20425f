use crate::collectors::Collector;
use crate::path::CanonicalPath;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Samples kept per captured endpoint.
pub const SAMPLE_CAP: usize = 3;
/// Reference sites kept per statically discovered endpoint.
pub const REFERENCE_CAP: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Upper-cased HTTP verb, or the `ANY` sentinel for method-less discoveries.
pub struct Method(String);

impl Method {
    pub const ANY: &'static str = "ANY";

    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn any() -> Self {
        Self(Self::ANY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Method {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Method {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.0
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Provenance tag recorded on catalog entries. Ordering is the merge order.
pub enum Source {
    Openapi,
    Capture,
    Static,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Openapi => "openapi",
            Source::Capture => "capture",
            Source::Static => "static",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record shape shared by the three inventories so loading, validation and
/// artifact writing can stay generic.
pub trait InventoryRecord: Serialize + DeserializeOwned {
    const COLLECTOR: Collector;

    /// One line of the plain-text companion listing (`METHOD path`).
    fn listing_line(&self) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One declared operation from the interface specification.
pub struct BaselineRecord {
    pub method: Method,
    pub path: CanonicalPath,
    #[serde(default, alias = "original")]
    pub original_path: String,
    #[serde(default, alias = "source")]
    pub source_document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, alias = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl InventoryRecord for BaselineRecord {
    const COLLECTOR: Collector = Collector::Baseline;

    fn listing_line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Requests observed in live traffic for one (method, path) key.
pub struct CaptureRecord {
    pub method: Method,
    pub path: CanonicalPath,
    pub count: u64,
    #[serde(default)]
    pub samples: Vec<String>,
}

impl InventoryRecord for CaptureRecord {
    const COLLECTOR: Collector = Collector::Capture;

    fn listing_line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A path literal found in source code; static scanning never learns a method.
pub struct StaticRecord {
    pub path: CanonicalPath,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl InventoryRecord for StaticRecord {
    const COLLECTOR: Collector = Collector::Static;

    fn listing_line(&self) -> String {
        format!("{} {}", Method::ANY, self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub file: String,
    pub line: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Fixed-capacity, append-only buffer. Pushes past capacity are dropped so
/// memory stays bounded no matter how often an endpoint is observed.
pub struct CappedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> CappedVec<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item` if there is room; returns whether it was kept.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
