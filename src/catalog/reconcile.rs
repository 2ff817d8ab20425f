//! Merge and scoring.
//!
//! `reconcile` is a pure fold over three borrowed inventories into a freshly
//! built catalog; nothing outside the call observes the in-progress map.
//!
//! Scoring:
//! - baseline membership adds the `openapi` source and no priority;
//! - every capture record adds `capture` and `count * 10`;
//! - a static record adds `static` and `+5` to every entry whose path ends
//!   with the static path, across all methods already known for it. When
//!   nothing matches, it becomes an `ANY` entry worth `2`.

use crate::catalog::{Catalog, CatalogEntry, EndpointKey};
use crate::inventory::{BaselineRecord, CaptureRecord, Method, Source, StaticRecord};
use std::collections::HashMap;

pub const CAPTURE_WEIGHT: u64 = 10;
pub const STATIC_MATCH_BONUS: u64 = 5;
pub const STATIC_ONLY_PRIORITY: u64 = 2;

pub fn reconcile(
    baseline: &[BaselineRecord],
    capture: &[CaptureRecord],
    statics: &[StaticRecord],
) -> Catalog {
    let mut merge = Merge::default();

    for record in baseline {
        let key = EndpointKey::new(record.method.clone(), record.path.clone());
        merge.entry(key).sources.insert(Source::Openapi);
    }

    for record in capture {
        let key = EndpointKey::new(record.method.clone(), record.path.clone());
        let entry = merge.entry(key);
        entry.sources.insert(Source::Capture);
        entry.priority = entry
            .priority
            .saturating_add(record.count.saturating_mul(CAPTURE_WEIGHT));
    }

    // Static hits only suffix-match entries that existed before the static
    // pass, which keeps scores independent of the static stream's order.
    let known = merge.entries.len();
    for record in statics {
        merge.fold_static(record, known);
    }

    merge.finish()
}

#[derive(Default)]
struct Merge {
    entries: Vec<CatalogEntry>,
    index: HashMap<EndpointKey, usize>,
}

impl Merge {
    fn entry(&mut self, key: EndpointKey) -> &mut CatalogEntry {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push(CatalogEntry::new(key));
                slot
            }
        };
        &mut self.entries[slot]
    }

    fn fold_static(&mut self, record: &StaticRecord, known: usize) {
        let mut matched = false;
        for entry in &mut self.entries[..known] {
            if entry.path.ends_with(&record.path) {
                entry.sources.insert(Source::Static);
                entry.priority = entry.priority.saturating_add(STATIC_MATCH_BONUS);
                matched = true;
            }
        }
        if matched {
            return;
        }

        let key = EndpointKey::new(Method::any(), record.path.clone());
        let is_new = !self.index.contains_key(&key);
        let entry = self.entry(key);
        entry.sources.insert(Source::Static);
        entry.priority = if is_new {
            STATIC_ONLY_PRIORITY
        } else {
            entry.priority.saturating_add(STATIC_MATCH_BONUS)
        };
    }

    fn finish(self) -> Catalog {
        let mut entries = self.entries;
        // Stable: ties keep first-seen order.
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        Catalog::from_sorted(entries)
    }
}
