//! Directory listing node types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single file or directory in a listing snapshot.
///
/// Nodes are built bottom-up by one listing call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Whether this entry is a directory.
    pub is_directory: bool,

    /// Ordered children; present only for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    /// Create a file node.
    pub fn new_file(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory: false,
            children: None,
        }
    }

    /// Create a directory node with the given children.
    pub fn new_directory(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        children: Vec<FileTreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory: true,
            children: Some(children),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_directory
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// Borrow the node's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Children as a slice (empty for files).
    pub fn children(&self) -> &[FileTreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FileTreeNode> {
        self.children().iter().find(|c| c.name.as_str() == name)
    }
}
