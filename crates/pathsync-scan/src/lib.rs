//! Directory tree reader for pathsync.
//!
//! Produces read-only snapshots of a directory's contents for presenting
//! sync state. It does not take part in syncing itself.
//!
//! # Overview
//!
//! - **Depth-bounded** recursion: `max_depth` counts expanded levels below
//!   the root, so a depth of 0 lists nothing
//! - **Pluggable filtering** through [`EntryFilter`]; [`DefaultEntryFilter`]
//!   hides dotfiles (keeping `.gitignore`) and `node_modules`
//! - **Stable ordering**: directories first, then names in a case- and
//!   accent-aware collation
//! - **Graceful degradation**: unreadable directories become empty subtrees,
//!   with optional diagnostics
//!
//! # Example
//!
//! ```rust,no_run
//! use pathsync_scan::TreeReader;
//!
//! let reader = TreeReader::new();
//! let listing = reader.read_tree_with_diagnostics("/path/to/project".as_ref(), 10);
//!
//! for node in &listing.nodes {
//!     println!("{}{}", node.name, if node.is_dir() { "/" } else { "" });
//! }
//! for path in listing.unreadable_paths() {
//!     eprintln!("could not read {}", path.display());
//! }
//! ```

mod collate;
mod filter;
mod reader;

pub use collate::compare_names;
pub use filter::{DefaultEntryFilter, EntryFilter, EntryInfo, IncludeAll};
pub use reader::{TreeListing, TreeReader, display_order, read_tree};

// Re-export core types for convenience
pub use pathsync_core::{FileTreeNode, ScanWarning, WarningKind};
