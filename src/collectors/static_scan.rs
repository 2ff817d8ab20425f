//! Static inventory from a source-tree scan.
//!
//! Every line of every matching source file is searched for API path
//! literals, the literal `websocket`, and plugin routes. Template
//! placeholders (`${userId}`) are rewritten to `:userId` before the path is
//! normalized. Matches are merged per canonical path with a few reference
//! sites each. Unreadable files are skipped with a warning.

use crate::inventory::{CappedVec, REFERENCE_CAP, Reference, StaticRecord};
use crate::path::CanonicalPath;
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

const WEBSOCKET_PATTERN: &str = r"websocket";
const PLUGIN_PATTERN: &str = r"/plugins/[\w/]+";

/// Line patterns, applied in order.
pub struct ScanPatterns {
    patterns: Vec<Regex>,
}

impl ScanPatterns {
    pub fn new(api_prefix: &str) -> Result<Self> {
        let api = format!(r"{}/[\w/{{}}]+", regex::escape(api_prefix));
        let patterns = [api.as_str(), WEBSOCKET_PATTERN, PLUGIN_PATTERN]
            .into_iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("compiling scan pattern {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Every match on `line`, grouped by pattern.
    pub fn matches<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .flat_map(move |pattern| pattern.find_iter(line).map(|m| m.as_str()))
    }
}

/// `${name}` → `:name`; stray closing braces are dropped.
pub fn template_to_placeholder(literal: &str) -> String {
    literal.replace("${", ":").replace('}', "")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub api_prefix: String,
    pub extensions: Vec<String>,
    pub reference_cap: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            api_prefix: super::capture::DEFAULT_API_PREFIX.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            reference_cap: REFERENCE_CAP,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub records: Vec<StaticRecord>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

pub struct StaticScanner {
    patterns: ScanPatterns,
    options: ScanOptions,
}

struct Found {
    path: CanonicalPath,
    references: CappedVec<Reference>,
}

#[derive(Default)]
struct Findings {
    index: HashMap<CanonicalPath, usize>,
    found: Vec<Found>,
}

impl Findings {
    fn record(&mut self, path: CanonicalPath, reference: Reference, cap: usize) {
        let slot = match self.index.get(&path) {
            Some(&slot) => slot,
            None => {
                let slot = self.found.len();
                self.index.insert(path.clone(), slot);
                self.found.push(Found {
                    path,
                    references: CappedVec::new(cap),
                });
                slot
            }
        };
        self.found[slot].references.push(reference);
    }

    fn into_records(self) -> Vec<StaticRecord> {
        let mut records: Vec<StaticRecord> = self
            .found
            .into_iter()
            .map(|found| StaticRecord {
                path: found.path,
                references: found.references.into_vec(),
            })
            .collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        records
    }
}

impl StaticScanner {
    pub fn new(options: ScanOptions) -> Result<Self> {
        Ok(Self {
            patterns: ScanPatterns::new(&options.api_prefix)?,
            options,
        })
    }

    /// Walk `root` and collect path literals from matching files.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        if !root.is_dir() {
            bail!("Repository path {} not found", root.display());
        }

        let mut findings = Findings::default();
        let mut outcome = ScanOutcome::default();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {err}", root.display());
                    outcome.files_skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.wants(entry.path()) {
                continue;
            }
            match self.scan_file(root, entry.path(), &mut findings) {
                Ok(()) => outcome.files_scanned += 1,
                Err(err) => {
                    warn!("skipping {}: {err:#}", entry.path().display());
                    outcome.files_skipped += 1;
                }
            }
        }

        outcome.records = findings.into_records();
        debug!(
            files = outcome.files_scanned,
            endpoints = outcome.records.len(),
            "scan finished"
        );
        Ok(outcome)
    }

    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.options.extensions.iter().any(|want| want == ext))
    }

    fn scan_file(&self, root: &Path, file: &Path, findings: &mut Findings) -> Result<()> {
        let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let relative = file
            .strip_prefix(root)
            .unwrap_or(file)
            .to_string_lossy()
            .replace('\\', "/");

        for (idx, line) in text.lines().enumerate() {
            for literal in self.patterns.matches(line) {
                let path = CanonicalPath::new(&template_to_placeholder(literal));
                findings.record(
                    path,
                    Reference {
                        file: relative.clone(),
                        line: idx as u64 + 1,
                    },
                    self.options.reference_cap,
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn patterns_find_api_websocket_and_plugin_literals() {
        let patterns = ScanPatterns::new("/api/v4").unwrap();
        let line = r#"fetch(`/api/v4/users/{user_id}/teams`); ws(url + "/websocket"); get("/plugins/com.x/ok")"#;
        let found: Vec<&str> = patterns.matches(line).collect();
        assert_eq!(
            found,
            vec!["/api/v4/users/{user_id}/teams", "websocket", "/plugins/com"]
        );
    }

    #[test]
    fn placeholders_are_rewritten() {
        assert_eq!(template_to_placeholder("/api/v4/users/${userId}"), "/api/v4/users/:userId");
        assert_eq!(template_to_placeholder("/api/v4/users/{user_id}"), "/api/v4/users/{user_id");
    }

    #[test]
    fn scan_merges_paths_and_caps_references() {
        let repo = TempDir::new().unwrap();
        let src = repo.path().join("app/client");
        fs::create_dir_all(&src).unwrap();
        let many = (0..8)
            .map(|_| "client.get('/api/v4/users/me');")
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(src.join("rest.ts"), many).unwrap();
        fs::write(src.join("socket.js"), "const url = 'websocket';\n").unwrap();
        fs::write(src.join("README.md"), "/api/v4/ignored\n").unwrap();

        let scanner = StaticScanner::new(ScanOptions::default()).unwrap();
        let outcome = scanner.scan(repo.path()).unwrap();
        assert_eq!(outcome.files_scanned, 2);

        let paths: Vec<&str> = outcome.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/v4/users/me", "/websocket"]);
        let users = &outcome.records[0];
        assert_eq!(users.references.len(), REFERENCE_CAP);
        assert_eq!(users.references[0].file, "app/client/rest.ts");
        assert_eq!(users.references[0].line, 1);
        assert_eq!(users.references[4].line, 5);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_and_others_kept() {
        use std::os::unix::fs::PermissionsExt;

        let repo = TempDir::new().unwrap();
        fs::write(repo.path().join("a_ok.ts"), "get('/api/v4/teams');\n").unwrap();
        let locked = repo.path().join("b_locked.ts");
        fs::write(&locked, "get('/api/v4/secret');\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users can still read mode 000 files.
        let unreadable = fs::read(&locked).is_err();

        let scanner = StaticScanner::new(ScanOptions::default()).unwrap();
        let outcome = scanner.scan(repo.path()).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(outcome.records.iter().any(|r| r.path.as_str() == "/api/v4/teams"));
        if unreadable {
            assert_eq!(outcome.files_skipped, 1);
            assert_eq!(outcome.files_scanned, 1);
            assert_eq!(outcome.records.len(), 1);
        }
    }

    #[test]
    fn missing_root_is_fatal() {
        let scanner = StaticScanner::new(ScanOptions::default()).unwrap();
        assert!(scanner.scan(Path::new("/nonexistent/census-scan-root")).is_err());
    }
}
