//! Incremental tree construction from slash-separated paths

use super::join_path;
use super::types::TreeNode;

/// Builds a canonical tree one path at a time.
///
/// Paths sharing a prefix are merged: an existing sibling with the same name
/// is reused instead of being duplicated, whatever order the paths arrive in.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    roots: Vec<TreeNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path; a trailing `/` marks the last segment as a directory.
    pub fn insert_path(&mut self, path: &str) {
        let is_dir = path.trim_end().ends_with('/');
        self.insert(path, is_dir);
    }

    /// Insert a file path, creating any missing parent directories
    pub fn insert_file(&mut self, path: &str) {
        self.insert(path, false);
    }

    /// Insert a directory path, creating any missing parent directories
    pub fn insert_dir(&mut self, path: &str) {
        self.insert(path, true);
    }

    pub fn finish(self) -> Vec<TreeNode> {
        self.roots
    }

    fn insert(&mut self, path: &str, leaf_is_dir: bool) {
        let parts: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect();
        insert_parts(&mut self.roots, "", &parts, leaf_is_dir);
    }
}

fn insert_parts(siblings: &mut Vec<TreeNode>, parent_path: &str, parts: &[&str], leaf_is_dir: bool) {
    let Some((head, tail)) = parts.split_first() else {
        return;
    };
    let path = join_path(parent_path, head);
    let wants_dir = !tail.is_empty() || leaf_is_dir;

    let idx = match siblings.iter().position(|node| node.name() == *head) {
        Some(idx) => {
            // A name first seen as a file turns out to have children.
            if wants_dir && !siblings[idx].is_dir() {
                siblings[idx] = TreeNode::directory(*head, path.clone());
            }
            idx
        }
        None => {
            siblings.push(if wants_dir {
                TreeNode::directory(*head, path.clone())
            } else {
                TreeNode::file(*head, path.clone())
            });
            siblings.len() - 1
        }
    };

    if let TreeNode::Directory { children, .. } = &mut siblings[idx] {
        insert_parts(children, &path, tail, leaf_is_dir);
    }
}

/// Append a node to a sibling list, merging it into a same-named sibling.
///
/// A directory absorbs the children of a later directory of the same name,
/// and a file that turns out to have children becomes a directory.
pub(super) fn push_merged(siblings: &mut Vec<TreeNode>, node: TreeNode) {
    let Some(idx) = siblings.iter().position(|sib| sib.name() == node.name()) else {
        siblings.push(node);
        return;
    };
    let TreeNode::Directory {
        name,
        path,
        children,
    } = node
    else {
        return;
    };
    if !siblings[idx].is_dir() {
        siblings[idx] = TreeNode::directory(name, path);
    }
    if let TreeNode::Directory {
        children: existing, ..
    } = &mut siblings[idx]
    {
        for child in children {
            push_merged(existing, child);
        }
    }
}
