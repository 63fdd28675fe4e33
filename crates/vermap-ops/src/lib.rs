//! High-level operations that wire the `vermap` CLI commands to the
//! manifest, snapshot and resolver crates.

pub mod ops_graph;
pub mod ops_resolve;

use std::path::{Path, PathBuf};

use vermap_core::MANIFEST_FILE;
use vermap_util::errors::VermapError;

/// Use `explicit` when given, otherwise search upward from `start` for a `Publish.toml`.
pub fn locate_manifest(explicit: Option<&Path>, start: &Path) -> miette::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    vermap_util::fs::find_ancestor_with(start, MANIFEST_FILE)
        .map(|dir| dir.join(MANIFEST_FILE))
        .ok_or_else(|| {
            VermapError::Manifest {
                message: format!("Could not find {MANIFEST_FILE} in {} or any parent", start.display()),
            }
            .into()
        })
}

/// Directory relative paths in the manifest are resolved against.
pub(crate) fn manifest_dir(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or(Path::new("."))
}
