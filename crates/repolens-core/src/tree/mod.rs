//! Canonical repository tree
//!
//! Ingestion and the hosting provider hand back file trees in several
//! incompatible shapes. [`normalize`] classifies a raw JSON value into one of
//! the recognized [`RawTree`] shapes and rebuilds it as an ordered sequence of
//! [`TreeNode`]s. Normalization never fails: anything it cannot read is
//! skipped, and an unrecognized value yields an empty tree.

mod builder;
mod encode;
mod indented;
mod nested;
mod shape;
mod types;

#[cfg(test)]
mod tests;

pub use builder::TreeBuilder;
pub use encode::{to_flat_paths, to_indented_text};
pub use shape::RawTree;
pub use types::{NodeKind, TreeNode};

use serde_json::Value;
use tracing::{debug, warn};

/// Spaces per nesting level in the indented text form
pub const INDENT_WIDTH: usize = 2;

/// Normalize a raw tree of any supported shape into canonical nodes.
pub fn normalize(raw: &Value) -> Vec<TreeNode> {
    let shape = RawTree::classify(raw);
    let shape_name = shape.name();
    let structure = match shape {
        RawTree::Indented(text) => indented::parse(text),
        RawTree::Wrapper(inner) => match inner {
            Some(inner) => normalize(inner),
            None => Vec::new(),
        },
        RawTree::Nested(items) => nested::convert_list(items, ""),
        RawTree::FlatPaths(paths) => {
            let mut builder = TreeBuilder::new();
            for path in paths {
                builder.insert_path(path);
            }
            builder.finish()
        }
        RawTree::Unrecognized => {
            warn!("Unsupported tree format: {}", describe(raw));
            Vec::new()
        }
    };

    debug!(
        shape = shape_name,
        roots = structure.len(),
        "normalized repository tree"
    );
    structure
}

fn describe(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Join a parent path and a segment; root entries have no prefix.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
