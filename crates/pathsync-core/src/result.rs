//! Per-mapping and per-batch sync outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncErrorKind};

/// Counters accumulated by a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyStats {
    /// Files written.
    pub files_copied: u64,
    /// Directories ensured at the destination (created or already present).
    pub dirs_created: u64,
    /// Bytes written.
    pub bytes_copied: u64,
}

impl CopyStats {
    /// Stats for one copied file.
    pub fn file(bytes: u64) -> Self {
        Self {
            files_copied: 1,
            dirs_created: 0,
            bytes_copied: bytes,
        }
    }

    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: CopyStats) {
        self.files_copied += other.files_copied;
        self.dirs_created += other.dirs_created;
        self.bytes_copied += other.bytes_copied;
    }
}

/// Outcome of executing one mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Id of the mapping this result belongs to.
    pub id: String,
    /// Whether the mapping synced without error.
    pub success: bool,
    /// Stringified error for failed mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Category of the error for failed mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<SyncErrorKind>,
    /// Human-readable summary for successful mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// What the copy touched.
    #[serde(default)]
    pub stats: CopyStats,
}

impl SyncResult {
    /// Create a successful result.
    pub fn succeeded(id: impl Into<String>, detail: impl Into<String>, stats: CopyStats) -> Self {
        Self {
            id: id.into(),
            success: true,
            error: None,
            error_kind: None,
            detail: Some(detail.into()),
            stats,
        }
    }

    /// Create a failed result from an error.
    pub fn failed(id: impl Into<String>, error: &SyncError) -> Self {
        Self {
            id: id.into(),
            success: false,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            detail: None,
            stats: CopyStats::default(),
        }
    }

    /// Check if this result carries the given error kind.
    pub fn is_kind(&self, kind: SyncErrorKind) -> bool {
        self.error_kind == Some(kind)
    }
}

/// Outcome of executing a batch of mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSyncResult {
    /// The batch call itself completed; per-mapping failures live in `results`.
    pub success: bool,
    /// Results of executed mappings, in input order.
    pub results: Vec<SyncResult>,
    /// Whether the batch stopped early because it was cancelled.
    #[serde(default)]
    pub cancelled: bool,
    /// When execution began.
    pub started_at: DateTime<Utc>,
    /// When execution ended.
    pub finished_at: DateTime<Utc>,
}

impl BatchSyncResult {
    /// Create a completed batch result.
    pub fn new(
        results: Vec<SyncResult>,
        cancelled: bool,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            success: true,
            results,
            cancelled,
            started_at,
            finished_at,
        }
    }

    /// Results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SyncResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Look up the first result with the given id.
    pub fn result(&self, id: &str) -> Option<&SyncResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Combined copy counters across all results.
    pub fn total_stats(&self) -> CopyStats {
        let mut total = CopyStats::default();
        for result in &self.results {
            total.merge(result.stats);
        }
        total
    }
}
