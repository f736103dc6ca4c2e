//! Re-encoding canonical trees into the raw input shapes

use super::INDENT_WIDTH;
use super::types::TreeNode;

/// Render nodes as indented text, directories suffixed with `/`.
pub fn to_indented_text(nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    write_indented(nodes, 0, &mut out);
    out
}

fn write_indented(nodes: &[TreeNode], depth: usize, out: &mut String) {
    let indent = " ".repeat(depth * INDENT_WIDTH);
    for node in nodes {
        out.push_str(&indent);
        out.push_str(node.name());
        if node.is_dir() {
            out.push('/');
        }
        out.push('\n');
        write_indented(node.children(), depth + 1, out);
    }
}

/// Flatten nodes into paths: files as-is, empty directories with a trailing `/`.
pub fn to_flat_paths(nodes: &[TreeNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(nodes, &mut paths);
    paths
}

fn collect_paths(nodes: &[TreeNode], paths: &mut Vec<String>) {
    for node in nodes {
        match node {
            TreeNode::File { path, .. } => paths.push(path.clone()),
            TreeNode::Directory { path, children, .. } if children.is_empty() => {
                paths.push(format!("{}/", path))
            }
            TreeNode::Directory { children, .. } => collect_paths(children, paths),
        }
    }
}
