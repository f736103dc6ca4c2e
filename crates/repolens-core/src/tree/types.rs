//! Tree node types

use serde::{Deserialize, Serialize};

/// Whether a node is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// One file or directory of a repository.
///
/// Directories always carry a (possibly empty) child list; files never do.
/// Serialized as `{"type": "file", "name": .., "path": ..}` or
/// `{"type": "directory", "name": .., "path": .., "children": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        name: String,
        path: String,
    },
    Directory {
        name: String,
        path: String,
        #[serde(default)]
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Directory {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn directory_with(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self::Directory {
            name: name.into(),
            path: path.into(),
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File { .. } => NodeKind::File,
            Self::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }

    /// Children of a directory; always empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::File { .. } => &[],
            Self::Directory { children, .. } => children,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Number of nodes in this subtree, including itself
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::count).sum::<usize>()
    }
}
