//! Canonical endpoint paths.
//!
//! Every collector funnels raw request paths through [`normalize`] so the
//! three inventories agree on endpoint identity. Identifier detection is a
//! shape heuristic: any 26-character lowercase alphanumeric segment is treated
//! as a generated id, including literal route segments that happen to have
//! that shape. Downstream counts depend on that exact boundary, so it is kept
//! as-is.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Placeholder segment substituted for identifier-shaped path segments.
pub const ID_PLACEHOLDER: &str = ":id";

const GENERATED_ID_LEN: usize = 26;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is a valid regex")
});

/// Normalize a raw request path into its canonical template.
///
/// Steps, in order: drop the query, force a single leading `/`, collapse
/// slash runs, replace UUID-shaped substrings with `:id`, then replace
/// 26-character lowercase alphanumeric segments with `:id`. Total and
/// idempotent.
pub fn normalize(raw: &str) -> String {
    let without_query = raw.split_once('?').map_or(raw, |(head, _)| head);

    let mut rooted = String::with_capacity(without_query.len() + 1);
    if !without_query.starts_with('/') {
        rooted.push('/');
    }
    rooted.push_str(without_query);

    let collapsed = collapse_slashes(&rooted);
    let without_uuids = replace_uuids(collapsed);
    replace_generated_ids(&without_uuids)
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for ch in path.chars() {
        let is_slash = ch == '/';
        if !(is_slash && previous_slash) {
            out.push(ch);
        }
        previous_slash = is_slash;
    }
    out
}

fn replace_uuids(mut path: String) -> String {
    // The trailing `d` of a placeholder can complete a new UUID match with the
    // text that follows it; loop until none remain.
    while UUID_PATTERN.is_match(&path) {
        path = UUID_PATTERN
            .replace_all(&path, ID_PLACEHOLDER)
            .into_owned();
    }
    path
}

fn replace_generated_ids(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if is_generated_id(segment) {
                ID_PLACEHOLDER
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// True when `segment` has the generated-id shape: exactly 26 characters, all
/// lowercase ASCII letters or digits.
pub fn is_generated_id(segment: &str) -> bool {
    segment.len() == GENERATED_ID_LEN
        && segment
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// A path that has been through [`normalize`].
///
/// Deserializing re-applies normalization; because the rule is idempotent this
/// is a no-op for inventories that were already canonical.
pub struct CanonicalPath(String);

impl CanonicalPath {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Suffix test used by the static-scan scoring policy.
    pub fn ends_with(&self, suffix: &CanonicalPath) -> bool {
        self.0.ends_with(suffix.as_str())
    }
}

impl From<String> for CanonicalPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for CanonicalPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CanonicalPath> for String {
    fn from(path: CanonicalPath) -> Self {
        path.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
