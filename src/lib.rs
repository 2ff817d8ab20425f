//! Endpoint census: reconcile what an API declares, what clients send, and
//! what client code references into one prioritized catalog.

pub mod catalog;
pub mod collectors;
pub mod inventory;
pub mod layout;
pub mod logging;
pub mod path;
pub mod report;
mod schema_loader;

pub use catalog::{Catalog, CatalogEntry, EndpointKey, reconcile};
pub use collectors::Collector;
pub use inventory::{
    BaselineRecord, CappedVec, CaptureRecord, Inventories, InventoryPaths, InventoryRecord, Method,
    Reference, Source, StaticRecord, load_inventory,
};
pub use layout::{OutputLayout, write_inventory};
pub use logging::init_logging;
pub use path::{CanonicalPath, ID_PLACEHOLDER, normalize};
pub use report::{ReportArtifacts, ReportOptions, render_markdown};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Locate a helper binary: next to the running executable first, then `PATH`.
pub fn resolve_helper_binary(name: &str) -> Option<PathBuf> {
    if let Ok(current_exe) = env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            let candidate = dir.join(name);
            if helper_is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    find_on_path(name)
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| helper_is_executable(candidate))
}

fn helper_is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn split_list_accepts_commas_and_whitespace() {
        assert_eq!(split_list("ts, tsx  js,,jsx"), vec!["ts", "tsx", "js", "jsx"]);
        assert!(split_list(" , ").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn helper_requires_exec_bit() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let helper = dir.path().join("census-merge");
        fs::write(&helper, "#!/bin/sh\n").unwrap();
        assert!(!helper_is_executable(&helper));
        let mut perms = fs::metadata(&helper).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&helper, perms).unwrap();
        assert!(helper_is_executable(&helper));
        assert!(!helper_is_executable(dir.path()));
    }
}
