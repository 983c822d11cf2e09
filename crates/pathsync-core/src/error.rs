//! Error types for sync and listing operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Errors that can occur while syncing a mapping.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The resolved source path does not exist.
    #[error("Source path does not exist: {}", path.display())]
    MissingSource { path: PathBuf },

    /// Underlying read/write/mkdir/stat failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying one file failed; either end may be at fault.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping is malformed (empty id, source or target).
    #[error("Invalid mapping: {message}")]
    InvalidMapping { message: String },

    /// Source and destination resolve to the same location.
    #[error("Source and target are the same location: {}", path.display())]
    SameLocation { path: PathBuf },

    /// A directory target sits inside its own source.
    #[error("Target {} lies inside source {}", target.display(), source_dir.display())]
    TargetInsideSource { source_dir: PathBuf, target: PathBuf },

    /// The operation was cancelled before it finished.
    #[error("Sync cancelled")]
    Cancelled,

    /// The configuration store could not be read or written.
    #[error("Configuration store error: {message}")]
    Store { message: String },
}

impl SyncError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a store error from any displayable cause.
    pub fn store(message: impl std::fmt::Display) -> Self {
        Self::Store {
            message: message.to_string(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> SyncErrorKind {
        match self {
            Self::MissingSource { .. } => SyncErrorKind::MissingSource,
            Self::Io { .. } | Self::Copy { .. } => SyncErrorKind::Io,
            Self::InvalidMapping { .. } => SyncErrorKind::InvalidMapping,
            Self::SameLocation { .. } => SyncErrorKind::SameLocation,
            Self::TargetInsideSource { .. } => SyncErrorKind::TargetInsideSource,
            Self::Cancelled => SyncErrorKind::Cancelled,
            Self::Store { .. } => SyncErrorKind::Store,
        }
    }
}

/// Serializable category of a [`SyncError`], carried on failed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum SyncErrorKind {
    #[strum(to_string = "missing source")]
    MissingSource,
    #[strum(to_string = "I/O failure")]
    Io,
    #[strum(to_string = "invalid mapping")]
    InvalidMapping,
    #[strum(to_string = "same location")]
    SameLocation,
    #[strum(to_string = "target inside source")]
    TargetInsideSource,
    #[strum(to_string = "cancelled")]
    Cancelled,
    #[strum(to_string = "store failure")]
    Store,
}

/// Kind of listing warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// The directory disappeared before it could be listed.
    NotFound,
    /// Any other error reading a directory.
    ReadError,
}

/// Non-fatal warning recorded for a directory that could not be listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Classify an I/O error raised while listing `path`.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let (kind, message) = match error.kind() {
            std::io::ErrorKind::PermissionDenied => (
                WarningKind::PermissionDenied,
                format!("Permission denied: {}", path.display()),
            ),
            std::io::ErrorKind::NotFound => (
                WarningKind::NotFound,
                format!("Not found: {}", path.display()),
            ),
            _ => (WarningKind::ReadError, format!("Read error: {error}")),
        };
        Self {
            path,
            message,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_message_names_path() {
        let err = SyncError::MissingSource {
            path: PathBuf::from("/no/such/file.txt"),
        };
        assert!(err.to_string().contains("/no/such/file.txt"));
        assert_eq!(err.kind(), SyncErrorKind::MissingSource);
    }

    #[test]
    fn test_io_error_keeps_system_text() {
        let err = SyncError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), SyncErrorKind::Io);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_target_inside_source_names_both_paths() {
        let err = SyncError::TargetInsideSource {
            source_dir: PathBuf::from("/work/src"),
            target: PathBuf::from("/work/src/backup"),
        };
        let message = err.to_string();
        assert!(message.contains("/work/src/backup"));
        assert!(message.ends_with("/work/src"));
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.kind(), SyncErrorKind::TargetInsideSource);
    }

    #[test]
    fn test_copy_error_is_io_kind() {
        let err = SyncError::Copy {
            from: PathBuf::from("/a/x"),
            to: PathBuf::from("/b/x"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(err.kind(), SyncErrorKind::Io);
        assert!(err.to_string().contains("/b/x"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(SyncErrorKind::MissingSource.to_string(), "missing source");
        assert_eq!(SyncErrorKind::Io.to_string(), "I/O failure");
    }

    #[test]
    fn test_scan_warning_from_io() {
        let warning = ScanWarning::from_io(
            "/test/path",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));
    }
}
