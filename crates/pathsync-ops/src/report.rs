//! Batch outcome aggregation.

use serde::Serialize;

use pathsync_core::SyncResult;

/// Counts derived from a sequence of per-mapping results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Mappings that were executed.
    pub executed: usize,
    /// Executed mappings that failed.
    pub failed: usize,
}

impl SyncSummary {
    /// Executed mappings that succeeded.
    pub fn succeeded(&self) -> usize {
        self.executed.saturating_sub(self.failed)
    }

    /// Check if no mapping failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Get a human-readable summary.
    pub fn message(&self) -> String {
        match (self.executed, self.failed) {
            (0, _) => "No mappings executed".to_string(),
            (n, 0) => format!("Sync completed: {n} {}", plural(n)),
            (n, f) => format!("{f} of {n} {} failed", plural(n)),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "mapping" } else { "mappings" }
}

/// Reduce results into executed/failed counts.
pub fn summarize(results: &[SyncResult]) -> SyncSummary {
    SyncSummary {
        executed: results.len(),
        failed: results.iter().filter(|r| !r.success).count(),
    }
}
