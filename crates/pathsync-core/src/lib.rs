//! Core types and traits for pathsync.
//!
//! This crate provides the fundamental data structures used throughout
//! the pathsync workspace: mappings, listing nodes, sync results, the
//! error taxonomy and the session configuration with its store handle.

mod config;
mod error;
mod mapping;
mod node;
mod result;
mod store;

pub use config::{DEFAULT_TREE_DEPTH, SyncConfig, SyncConfigBuilder};
pub use error::{ScanWarning, SyncError, SyncErrorKind, WarningKind};
pub use mapping::SyncMapping;
pub use node::FileTreeNode;
pub use result::{BatchSyncResult, CopyStats, SyncResult};
pub use store::{ConfigStore, JsonFileStore, MAPPINGS_KEY, MemoryStore, WORKING_DIR_KEY};
