//! Discovery of `.vmoptions` files in an install directory

use std::fs;
use std::path::{Path, PathBuf};

use super::permission;
use crate::config::VMOPTIONS_SUFFIX;
use crate::error::PatchError;

/// Whether a file name carries the options suffix, ignoring case
pub fn has_vmoptions_suffix(name: &str) -> bool {
    name.to_lowercase().ends_with(VMOPTIONS_SUFFIX)
}

/// Find option files directly inside `dir` (no recursion)
///
/// Paths come back absolute, in directory enumeration order. Directories are
/// skipped even when their name matches. An empty result is not an error.
pub fn find_vmoptions_files(dir: &Path) -> Result<Vec<PathBuf>, PatchError> {
    permission::check_dir_readable(dir)?;

    let dir = std::path::absolute(dir).map_err(|source| PatchError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(&dir).map_err(|source| PatchError::Read {
        path: dir.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name();
        if !has_vmoptions_suffix(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        tracing::debug!(file = %path.display(), "found options file");
        files.push(path);
    }

    Ok(files)
}
