//! Permission preflight
//!
//! Every check opens and immediately drops a handle. Opening for write never
//! truncates, so a failed or successful check leaves content and mtime alone.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{Access, PatchError};

/// Ensure `dir` can be listed
pub fn check_dir_readable(dir: &Path) -> Result<(), PatchError> {
    fs::read_dir(dir).map(drop).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PatchError::NotFound {
            path: dir.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => PatchError::DirectoryPermission {
            path: dir.to_path_buf(),
            source,
        },
        _ => PatchError::Read {
            path: dir.to_path_buf(),
            source,
        },
    })
}

/// Ensure `file` can be opened for reading
pub fn check_file_readable(file: &Path) -> Result<(), PatchError> {
    probe(file, Access::Read)
}

/// Ensure `file` can be opened for writing
pub fn check_file_writable(file: &Path) -> Result<(), PatchError> {
    probe(file, Access::Write)
}

/// Read check first, then write check
pub fn check_file_read_write(file: &Path) -> Result<(), PatchError> {
    check_file_readable(file)?;
    check_file_writable(file)
}

fn probe(file: &Path, access: Access) -> Result<(), PatchError> {
    let mut options = OpenOptions::new();
    match access {
        Access::Read => options.read(true),
        Access::Write => options.write(true),
    };

    options.open(file).map(drop).map_err(|source| {
        if source.kind() == io::ErrorKind::PermissionDenied {
            PatchError::FilePermission {
                path: file.to_path_buf(),
                access,
                source,
            }
        } else if access == Access::Read {
            PatchError::Read {
                path: file.to_path_buf(),
                source,
            }
        } else {
            PatchError::Write {
                path: file.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_readable_dir() {
        let dir = TempDir::new().unwrap();
        assert!(check_dir_readable(dir.path()).is_ok());
    }

    #[test]
    fn test_missing_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = check_dir_readable(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_write_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("idea64.vmoptions");
        fs::write(&file, "-Xmx2048m\n").unwrap();

        assert!(check_file_read_write(&file).is_ok());
        assert_eq!(fs::read_to_string(&file).unwrap(), "-Xmx2048m\n");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = check_file_readable(&dir.path().join("gone.vmoptions")).unwrap_err();
        assert!(matches!(err, PatchError::Read { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_file_fails_write_check() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("idea64.vmoptions");
        fs::write(&file, "-Xmx2048m\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();

        // root ignores mode bits
        if OpenOptions::new().write(true).open(&file).is_ok() {
            return;
        }

        assert!(check_file_readable(&file).is_ok());
        let err = check_file_read_write(&file).unwrap_err();
        assert!(matches!(
            err,
            PatchError::FilePermission {
                access: Access::Write,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&file).unwrap(), "-Xmx2048m\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = check_dir_readable(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if let Err(err) = result {
            assert!(matches!(err, PatchError::DirectoryPermission { .. }));
        }
    }
}
