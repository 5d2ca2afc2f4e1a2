//! Error taxonomy for locating and patching option files

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config;

/// Which access a permission check was probing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Coarse category of a failure, for deciding what to tell the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Fix OS permissions
    Permission,
    /// Verify the path
    NotFound,
    /// Check disk state
    Io,
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Cannot list directory {}: {source}\nHint: {}", .path.display(), config::permission_hint())]
    DirectoryPermission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No {access} permission on {}: {source}\nHint: {}", .path.display(), config::permission_hint())]
    FilePermission {
        path: PathBuf,
        access: Access,
        #[source]
        source: io::Error,
    },

    #[error("No {} files found in {}", config::VMOPTIONS_SUFFIX, .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read permissions of {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryPermission { .. } | Self::FilePermission { .. } => ErrorKind::Permission,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Read { .. } | Self::Write { .. } | Self::Stat { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let denied = || io::Error::from(io::ErrorKind::PermissionDenied);

        let err = PatchError::FilePermission {
            path: PathBuf::from("/x/idea64.vmoptions"),
            access: Access::Write,
            source: denied(),
        };
        assert_eq!(err.kind(), ErrorKind::Permission);

        let err = PatchError::NotFound {
            path: PathBuf::from("/x"),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = PatchError::Stat {
            path: PathBuf::from("/x/idea64.vmoptions"),
            source: denied(),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_permission_message_has_hint() {
        let err = PatchError::FilePermission {
            path: PathBuf::from("/x/idea64.vmoptions"),
            access: Access::Write,
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.contains("No write permission on /x/idea64.vmoptions"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_not_found_message() {
        let err = PatchError::NotFound {
            path: PathBuf::from("/opt/idea/bin"),
        };
        assert_eq!(err.to_string(), "No .vmoptions files found in /opt/idea/bin");
    }
}
