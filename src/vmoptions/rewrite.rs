//! Write-back that keeps the original permission bits
//!
//! Content goes to a temporary file next to the target which is then renamed
//! over it. Install directories are often not writable even when the options
//! file is, so if the temporary file cannot be created the target is
//! overwritten in place instead. Symlinks are resolved first so the link
//! survives and its target is what gets rewritten.

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::PatchError;

/// How a rewrite reached the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMethod {
    /// Temporary file renamed over the target
    Replaced,
    /// Target truncated and rewritten
    Overwritten,
}

pub fn write_preserving_permissions(path: &Path, content: &str) -> Result<WriteMethod, PatchError> {
    let stat_err = |source: io::Error| PatchError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let permissions = fs::metadata(path).map_err(stat_err)?.permissions();
    let target = fs::canonicalize(path).map_err(stat_err)?;

    let write_err = |source: io::Error| PatchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = target.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = match NamedTempFile::new_in(parent) {
        Ok(tmp) => tmp,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!(
                file = %path.display(),
                "directory not writable, overwriting in place"
            );
            fs::write(&target, content).map_err(write_err)?;
            fs::set_permissions(&target, permissions).map_err(write_err)?;
            return Ok(WriteMethod::Overwritten);
        }
        Err(e) => return Err(write_err(e)),
    };

    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(WriteMethod::Replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rewrite_replaces_content() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("idea64.vmoptions");
        fs::write(&file, "old\n").unwrap();

        let method = write_preserving_permissions(&file, "new\n").unwrap();

        assert_eq!(method, WriteMethod::Replaced);
        assert_eq!(fs::read_to_string(&file).unwrap(), "new\n");
        // No stray temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_target_is_stat_error() {
        let dir = TempDir::new().unwrap();
        let err = write_preserving_permissions(&dir.path().join("x.vmoptions"), "").unwrap_err();
        assert!(matches!(err, PatchError::Stat { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("idea64.vmoptions");
        fs::write(&file, "old\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

        write_preserving_permissions(&file, "new\n").unwrap();

        let mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_is_rewritten() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.vmoptions.txt");
        let link = dir.path().join("idea64.vmoptions");
        fs::write(&real, "-Xmx2048m\n").unwrap();
        symlink(&real, &link).unwrap();

        write_preserving_permissions(&link, "-Xmx4096m\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), real);
        assert_eq!(fs::read_to_string(&real).unwrap(), "-Xmx4096m\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_dir_falls_back_to_overwrite() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let file = bin.join("idea64.vmoptions");
        fs::write(&file, "old\n").unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o555)).unwrap();

        let result = write_preserving_permissions(&file, "new\n");
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let method = result.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "new\n");
        // root can still create the temporary file
        assert!(matches!(method, WriteMethod::Overwritten | WriteMethod::Replaced));
    }
}
