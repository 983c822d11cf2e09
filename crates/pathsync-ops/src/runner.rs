//! Async batch execution with streamed results.

use tokio::sync::mpsc;

use pathsync_core::{BatchSyncResult, SyncMapping, SyncResult};

use crate::SYNC_CHANNEL_SIZE;
use crate::executor::MappingExecutor;

/// Event sent through the channel while a batch runs.
#[derive(Debug)]
pub enum SyncEvent {
    /// The batch started; `total` enabled mappings are queued.
    Started { total: usize },
    /// One mapping finished.
    Mapping(SyncResult),
    /// The batch completed.
    Complete(BatchSyncResult),
}

/// Start a batch on a blocking task.
///
/// Mappings still run one after another; the receiver sees one
/// [`SyncEvent::Mapping`] per executed mapping, in order, then
/// [`SyncEvent::Complete`]. Must be called from within a Tokio runtime.
pub fn start_sync(
    executor: MappingExecutor,
    mappings: Vec<SyncMapping>,
) -> mpsc::Receiver<SyncEvent> {
    let (tx, rx) = mpsc::channel(SYNC_CHANNEL_SIZE);

    tokio::task::spawn_blocking(move || {
        let total = mappings.iter().filter(|m| m.enabled).count();
        let _ = tx.blocking_send(SyncEvent::Started { total });

        let batch = executor.execute_all_with(&mappings, |result| {
            let _ = tx.blocking_send(SyncEvent::Mapping(result.clone()));
        });

        let _ = tx.blocking_send(SyncEvent::Complete(batch));
    });

    rx
}
