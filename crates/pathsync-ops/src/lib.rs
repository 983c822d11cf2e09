//! Sync engine for pathsync.
//!
//! This crate mirrors declared source → target mappings onto the filesystem:
//! endpoint resolution, the copy primitives, per-mapping execution with
//! failure isolation, batch aggregation and an async runner that streams
//! results through a channel.

mod copy;
mod engine;
mod executor;
mod report;
mod resolver;
mod runner;

pub use copy::{CopyEngine, copy_directory, copy_file};
pub use engine::SyncEngine;
pub use executor::{MappingExecutor, SyncPlan};
pub use report::{SyncSummary, summarize};
pub use resolver::{PathResolver, normalize};
pub use runner::{SyncEvent, start_sync};

pub use tokio_util::sync::CancellationToken;

/// Default channel buffer size for streamed sync events.
pub const SYNC_CHANNEL_SIZE: usize = 100;
