//! Depth-bounded directory tree reader.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use pathsync_core::{FileTreeNode, ScanWarning};

use crate::collate::compare_names;
use crate::filter::{DefaultEntryFilter, EntryFilter, EntryInfo};

/// Nodes produced by one listing plus the directories that could not be read.
#[derive(Debug, Clone, Default)]
pub struct TreeListing {
    /// Top-level entries under the listed root.
    pub nodes: Vec<FileTreeNode>,
    /// One warning per directory whose contents were replaced by an empty subtree.
    pub warnings: Vec<ScanWarning>,
}

impl TreeListing {
    /// Check if every directory could be listed.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Paths that could not be listed.
    pub fn unreadable_paths(&self) -> impl Iterator<Item = &Path> {
        self.warnings.iter().map(|w| w.path.as_path())
    }
}

/// Recursive directory lister with a pluggable inclusion policy.
///
/// Every call walks the filesystem afresh; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct TreeReader<F = DefaultEntryFilter> {
    filter: F,
}

impl TreeReader {
    /// Create a reader with the default filter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: EntryFilter> TreeReader<F> {
    /// Create a reader with a custom filter.
    pub fn with_filter(filter: F) -> Self {
        Self { filter }
    }

    /// Get the filter in use.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// List `root`, expanding at most `max_depth` directory levels.
    ///
    /// Unreadable directories yield empty subtrees.
    pub fn read_tree(&self, root: &Path, max_depth: u32) -> Vec<FileTreeNode> {
        self.read_tree_with_diagnostics(root, max_depth).nodes
    }

    /// Like [`read_tree`](Self::read_tree), also reporting unreadable directories.
    pub fn read_tree_with_diagnostics(&self, root: &Path, max_depth: u32) -> TreeListing {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let mut warnings = Vec::new();
        let nodes = self.read_level(&root, max_depth, &mut warnings);

        tracing::debug!(
            root = %root.display(),
            entries = nodes.len(),
            unreadable = warnings.len(),
            "listed directory tree"
        );

        TreeListing { nodes, warnings }
    }

    fn read_level(
        &self,
        dir: &Path,
        remaining: u32,
        warnings: &mut Vec<ScanWarning>,
    ) -> Vec<FileTreeNode> {
        if remaining == 0 {
            return Vec::new();
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(path = %dir.display(), error = %err, "skipping unreadable directory");
                warnings.push(ScanWarning::from_io(dir, &err));
                return Vec::new();
            }
        };

        let mut nodes = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(path = %dir.display(), error = %err, "skipping unreadable entry");
                    warnings.push(ScanWarning::from_io(dir, &err));
                    continue;
                }
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_directory = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(err) => {
                    warnings.push(ScanWarning::from_io(&path, &err));
                    continue;
                }
            };

            let info = EntryInfo {
                name: &name,
                path: &path,
                is_directory,
            };
            if !self.filter.should_include(&info) {
                continue;
            }

            let node = if is_directory {
                let children = self.read_level(&path, remaining - 1, warnings);
                FileTreeNode::new_directory(name, path, children)
            } else {
                FileTreeNode::new_file(name, path)
            };
            nodes.push(node);
        }

        nodes.sort_by(display_order);
        nodes
    }
}

/// Directories first, then collated names.
pub fn display_order(a: &FileTreeNode, b: &FileTreeNode) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// List `root` with the default filter.
pub fn read_tree(root: impl AsRef<Path>, max_depth: u32) -> Vec<FileTreeNode> {
    TreeReader::new().read_tree(root.as_ref(), max_depth)
}
