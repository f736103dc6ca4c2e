//! Lists of node records

use super::builder::push_merged;
use super::join_path;
use super::types::TreeNode;
use serde_json::{Map, Value};
use tracing::debug;

pub(super) fn convert_list(items: &[Value], parent_path: &str) -> Vec<TreeNode> {
    let mut nodes = Vec::new();
    let records = items.iter().filter_map(|item| match item {
        Value::Object(record) => convert_record(record, parent_path),
        _ => None,
    });
    for node in records {
        push_merged(&mut nodes, node);
    }
    nodes
}

fn convert_record(record: &Map<String, Value>, parent_path: &str) -> Option<TreeNode> {
    let explicit_path = record
        .get("path")
        .and_then(Value::as_str)
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty());

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| explicit_path.and_then(last_segment).map(str::to_string));

    let Some(name) = name else {
        debug!("Dropping tree record without name or path");
        return None;
    };
    let path = explicit_path
        .map(str::to_string)
        .unwrap_or_else(|| join_path(parent_path, &name));

    if is_directory(record) {
        let children = match record.get("children") {
            Some(Value::Array(children)) => convert_list(children, &path),
            _ => Vec::new(),
        };
        Some(TreeNode::directory_with(name, path, children))
    } else {
        Some(TreeNode::file(name, path))
    }
}

fn is_directory(record: &Map<String, Value>) -> bool {
    let kind = record
        .get("type")
        .or_else(|| record.get("kind"))
        .and_then(Value::as_str)
        .unwrap_or("file");
    matches!(kind, "directory" | "dir" | "tree")
}

fn last_segment(path: &str) -> Option<&str> {
    path.rsplit('/').find(|seg| !seg.is_empty())
}
