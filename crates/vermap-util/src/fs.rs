use std::path::{Path, PathBuf};

use crate::errors::VermapError;

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Read a file to a string, naming the path in the error.
///
/// `wrap` picks the error variant so callers report manifest and snapshot
/// failures under their own headings.
pub fn read_to_string_with<F>(path: &Path, wrap: F) -> Result<String, VermapError>
where
    F: FnOnce(String) -> VermapError,
{
    tracing::debug!("reading {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| wrap(format!("Failed to read {}: {e}", path.display())))
}
