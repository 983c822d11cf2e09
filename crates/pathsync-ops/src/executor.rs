//! Per-mapping execution and sequential batch execution.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use pathsync_core::{BatchSyncResult, CopyStats, SyncError, SyncErrorKind, SyncMapping, SyncResult};

use crate::copy::CopyEngine;
use crate::report::summarize;
use crate::resolver::PathResolver;

/// What a mapping will do once executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    /// Populate `target` with the contents of directory `source`.
    Directory { source: PathBuf, target: PathBuf },
    /// Copy file `source` to `destination`.
    File {
        source: PathBuf,
        destination: PathBuf,
    },
}

impl SyncPlan {
    /// The resolved source path.
    pub fn source(&self) -> &Path {
        match self {
            Self::Directory { source, .. } | Self::File { source, .. } => source,
        }
    }

    /// The path that receives the content.
    pub fn destination(&self) -> &Path {
        match self {
            Self::Directory { target, .. } => target,
            Self::File { destination, .. } => destination,
        }
    }

    /// Human-readable description of the plan.
    pub fn describe(&self) -> String {
        match self {
            Self::Directory { source, target } => format!(
                "Synced directory {} -> {}",
                source.display(),
                target.display()
            ),
            Self::File {
                source,
                destination,
            } => format!(
                "Synced file {} -> {}",
                source.display(),
                destination.display()
            ),
        }
    }
}

/// Executes mappings through a resolver and a copy engine.
///
/// Mappings in a batch run strictly one after another.
#[derive(Debug, Clone, Default)]
pub struct MappingExecutor {
    resolver: PathResolver,
    engine: CopyEngine,
    cancel: Option<CancellationToken>,
}

impl MappingExecutor {
    /// Create an executor resolving against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor with a specific resolver.
    pub fn with_resolver(resolver: PathResolver) -> Self {
        Self {
            resolver,
            ..Default::default()
        }
    }

    /// Stop copying and skip remaining mappings once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.engine = self.engine.with_cancellation(token.clone());
        self.cancel = Some(token);
        self
    }

    /// Get the resolver in use.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Classify a mapping without writing anything.
    pub fn plan(&self, mapping: &SyncMapping) -> Result<SyncPlan, SyncError> {
        mapping.validate()?;

        let source = self.resolver.resolve(&mapping.source);
        let target = self.resolver.resolve(&mapping.target);

        let metadata = match fs::metadata(&source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::MissingSource { path: source });
            }
            Err(e) => return Err(SyncError::io(&source, e)),
        };

        if metadata.is_dir() {
            if target == source {
                return Err(SyncError::SameLocation { path: source });
            }
            if target.starts_with(&source) {
                return Err(SyncError::TargetInsideSource {
                    source_dir: source,
                    target,
                });
            }
            return Ok(SyncPlan::Directory { source, target });
        }

        let destination = if target.is_dir() {
            let file_name = source.file_name().ok_or_else(|| SyncError::InvalidMapping {
                message: format!("source {} has no file name", source.display()),
            })?;
            target.join(file_name)
        } else {
            target
        };

        if destination == source {
            return Err(SyncError::SameLocation { path: source });
        }

        Ok(SyncPlan::File {
            source,
            destination,
        })
    }

    fn run(&self, mapping: &SyncMapping) -> Result<(SyncPlan, CopyStats), SyncError> {
        let plan = self.plan(mapping)?;
        let stats = match &plan {
            SyncPlan::Directory { source, target } => self.engine.copy_directory(source, target)?,
            SyncPlan::File {
                source,
                destination,
            } => self.engine.copy_file(source, destination)?,
        };
        Ok((plan, stats))
    }

    /// Execute one mapping. Errors become a failed result; nothing propagates.
    pub fn execute_one(&self, mapping: &SyncMapping) -> SyncResult {
        match self.run(mapping) {
            Ok((plan, stats)) => {
                let detail = plan.describe();
                tracing::info!(
                    id = %mapping.id,
                    files = stats.files_copied,
                    bytes = stats.bytes_copied,
                    "{detail}"
                );
                SyncResult::succeeded(&mapping.id, detail, stats)
            }
            Err(err) => {
                tracing::warn!(id = %mapping.id, error = %err, "mapping failed");
                SyncResult::failed(&mapping.id, &err)
            }
        }
    }

    /// Execute every enabled mapping in input order.
    pub fn execute_all(&self, mappings: &[SyncMapping]) -> BatchSyncResult {
        self.execute_all_with(mappings, |_| {})
    }

    /// Like [`execute_all`](Self::execute_all), calling `on_result` after each mapping.
    ///
    /// Disabled mappings are skipped without a result.
    pub fn execute_all_with<F>(&self, mappings: &[SyncMapping], mut on_result: F) -> BatchSyncResult
    where
        F: FnMut(&SyncResult),
    {
        let started_at = Utc::now();
        let mut results = Vec::new();
        let mut cancelled = false;

        for mapping in mappings.iter().filter(|m| m.enabled) {
            if self.is_cancelled() {
                cancelled = true;
                break;
            }

            let result = self.execute_one(mapping);
            let stop = result.is_kind(SyncErrorKind::Cancelled);
            on_result(&result);
            results.push(result);

            if stop {
                cancelled = true;
                break;
            }
        }

        let summary = summarize(&results);
        tracing::info!(
            executed = summary.executed,
            failed = summary.failed,
            cancelled,
            "{}",
            summary.message()
        );

        BatchSyncResult::new(results, cancelled, started_at, Utc::now())
    }
}
