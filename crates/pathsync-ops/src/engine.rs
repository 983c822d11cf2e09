//! Session-level facade over listing and syncing.

use std::path::Path;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pathsync_core::{BatchSyncResult, FileTreeNode, SyncConfig, SyncError, SyncMapping, SyncResult};
use pathsync_scan::{DefaultEntryFilter, EntryFilter, TreeListing, TreeReader};

use crate::executor::{MappingExecutor, SyncPlan};
use crate::resolver::PathResolver;
use crate::runner::{SyncEvent, start_sync};

/// One sync session bound to an explicit configuration.
///
/// Independent engines never share state, so several sessions can run side by side.
#[derive(Debug, Clone)]
pub struct SyncEngine<F = DefaultEntryFilter> {
    config: SyncConfig,
    executor: MappingExecutor,
    reader: TreeReader<F>,
}

impl SyncEngine {
    /// Create an engine for `config` with the default listing filter.
    pub fn new(config: SyncConfig) -> Self {
        Self::with_filter(config, DefaultEntryFilter)
    }
}

impl<F: EntryFilter> SyncEngine<F> {
    /// Create an engine with a custom listing filter.
    pub fn with_filter(config: SyncConfig, filter: F) -> Self {
        let resolver = match &config.working_dir {
            Some(dir) => PathResolver::with_base(dir),
            None => PathResolver::current(),
        };
        Self {
            config,
            executor: MappingExecutor::with_resolver(resolver),
            reader: TreeReader::with_filter(filter),
        }
    }

    /// Cancel in-flight copies and skip remaining mappings once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.executor = self.executor.with_cancellation(token);
        self
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Get the mapping executor.
    pub fn executor(&self) -> &MappingExecutor {
        &self.executor
    }

    /// List `root` down to the configured tree depth.
    pub fn read_tree(&self, root: impl AsRef<Path>) -> Vec<FileTreeNode> {
        self.read_tree_with_diagnostics(root).nodes
    }

    /// List `root`, also reporting directories that could not be read.
    pub fn read_tree_with_diagnostics(&self, root: impl AsRef<Path>) -> TreeListing {
        let root = self.executor.resolver().resolve(root);
        self.reader
            .read_tree_with_diagnostics(&root, self.config.tree_depth)
    }

    /// Execute one mapping.
    pub fn sync_one(&self, mapping: &SyncMapping) -> SyncResult {
        self.executor.execute_one(mapping)
    }

    /// Execute every enabled mapping in order.
    pub fn sync_all(&self, mappings: &[SyncMapping]) -> BatchSyncResult {
        self.executor.execute_all(mappings)
    }

    /// Execute the mappings held by the session configuration.
    pub fn sync_configured(&self) -> BatchSyncResult {
        self.executor.execute_all(&self.config.mappings)
    }

    /// Classify each enabled configured mapping without writing anything.
    pub fn plan_configured(&self) -> Vec<(&SyncMapping, Result<SyncPlan, SyncError>)> {
        self.config
            .enabled_mappings()
            .map(|m| (m, self.executor.plan(m)))
            .collect()
    }

    /// Run the configured mappings on a blocking task, streaming events.
    pub fn spawn_configured(&self) -> mpsc::Receiver<SyncEvent> {
        start_sync(self.executor.clone(), self.config.mappings.clone())
    }
}
