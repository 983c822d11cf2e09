//! File and directory copy primitives.

use std::fs;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use pathsync_core::{CopyStats, SyncError};

/// Blocking copy engine with additive-overwrite semantics.
///
/// Destination entries with no counterpart in the source are never removed.
#[derive(Debug, Clone, Default)]
pub struct CopyEngine {
    cancel: Option<CancellationToken>,
}

impl CopyEngine {
    /// Create an engine without cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `token` between entries and stop with [`SyncError::Cancelled`] once it fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    fn check_cancelled(&self) -> Result<(), SyncError> {
        if self.is_cancelled() {
            Err(SyncError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Copy one file, creating missing ancestors of `dst` and replacing its content.
    ///
    /// A failed copy may leave `dst` truncated.
    pub fn copy_file(&self, src: &Path, dst: &Path) -> Result<CopyStats, SyncError> {
        self.check_cancelled()?;

        let mut stats = CopyStats::default();
        if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
                stats.dirs_created += 1;
            }
        }

        stats.merge(copy_bytes(src, dst)?);
        Ok(stats)
    }

    /// Recursively copy the contents of `src` into `dst`, creating `dst` if needed.
    pub fn copy_directory(&self, src: &Path, dst: &Path) -> Result<CopyStats, SyncError> {
        self.check_cancelled()?;

        fs::create_dir_all(dst).map_err(|e| SyncError::io(dst, e))?;
        let mut stats = CopyStats {
            dirs_created: 1,
            ..CopyStats::default()
        };

        let entries = fs::read_dir(src).map_err(|e| SyncError::io(src, e))?;

        for entry in entries {
            self.check_cancelled()?;

            let entry = entry.map_err(|e| SyncError::io(src, e))?;
            let path = entry.path();
            let dest_path = dst.join(entry.file_name());

            if path.is_dir() {
                stats.merge(self.copy_directory(&path, &dest_path)?);
            } else {
                stats.merge(copy_bytes(&path, &dest_path)?);
            }
        }

        Ok(stats)
    }
}

/// Copy a single file whose destination parent already exists.
fn copy_bytes(src: &Path, dst: &Path) -> Result<CopyStats, SyncError> {
    let bytes = fs::copy(src, dst).map_err(|e| SyncError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(from = %src.display(), to = %dst.display(), bytes, "copied file");
    Ok(CopyStats::file(bytes))
}

/// Copy one file with a default engine.
pub fn copy_file(src: &Path, dst: &Path) -> Result<CopyStats, SyncError> {
    CopyEngine::new().copy_file(src, dst)
}

/// Copy a directory tree with a default engine.
pub fn copy_directory(src: &Path, dst: &Path) -> Result<CopyStats, SyncError> {
    CopyEngine::new().copy_directory(src, dst)
}
