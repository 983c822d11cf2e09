//! Source → target mapping declarations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// A declared source → target association.
///
/// Treated as immutable input for the duration of one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMapping {
    /// Caller-assigned identifier, expected to be unique within a batch.
    pub id: String,
    /// Path whose content is mirrored.
    pub source: PathBuf,
    /// Path that receives the content.
    pub target: PathBuf,
    /// Disabled mappings are skipped by batch execution.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl SyncMapping {
    /// Create an enabled mapping.
    pub fn new(id: impl Into<String>, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            enabled: true,
        }
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check that id, source and target are all non-empty.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.id.trim().is_empty() {
            return Err(SyncError::InvalidMapping {
                message: "mapping id cannot be empty".to_string(),
            });
        }
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::InvalidMapping {
                message: format!("mapping '{}' has an empty source", self.id),
            });
        }
        if self.target.as_os_str().is_empty() {
            return Err(SyncError::InvalidMapping {
                message: format!("mapping '{}' has an empty target", self.id),
            });
        }
        Ok(())
    }
}
