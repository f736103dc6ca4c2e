//! Indented text trees
//!
//! ```text
//! src/
//!   main.rs
//!   util/
//!     fs.rs
//! README.md
//! ```

use super::builder::push_merged;
use super::types::TreeNode;
use super::{INDENT_WIDTH, join_path};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn line_pattern() -> &'static Regex {
    LINE_PATTERN.get_or_init(|| Regex::new(r"^(\s*)([^\s/]+/?)$").expect("valid line pattern"))
}

/// A directory whose children are still being read
struct OpenDir {
    name: String,
    path: String,
    children: Vec<TreeNode>,
}

pub(super) fn parse(text: &str) -> Vec<TreeNode> {
    let mut root: Vec<TreeNode> = Vec::new();
    let mut open: Vec<OpenDir> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let Some(caps) = line_pattern().captures(line) else {
            debug!(line = line_no + 1, "Skipping unparseable tree line: {:?}", line);
            continue;
        };
        let indent = caps[1].chars().count();
        if indent % INDENT_WIDTH != 0 {
            debug!(
                line = line_no + 1,
                indent, "Skipping misaligned tree line: {:?}", line
            );
            continue;
        }
        let level = indent / INDENT_WIDTH;

        // Returning to a shallower level closes every deeper directory.
        while open.len() > level {
            close_innermost(&mut root, &mut open);
        }

        let token = &caps[2];
        let (name, is_dir) = match token.strip_suffix('/') {
            Some(name) => (name, true),
            None => (token, false),
        };
        let parent_path = open.last().map(|dir| dir.path.as_str()).unwrap_or("");
        let path = join_path(parent_path, name);

        if is_dir {
            open.push(OpenDir {
                name: name.to_string(),
                path,
                children: Vec::new(),
            });
        } else {
            let node = TreeNode::file(name, path);
            match open.last_mut() {
                Some(dir) => push_merged(&mut dir.children, node),
                None => push_merged(&mut root, node),
            }
        }
    }

    while !open.is_empty() {
        close_innermost(&mut root, &mut open);
    }
    root
}

fn close_innermost(root: &mut Vec<TreeNode>, open: &mut Vec<OpenDir>) {
    let Some(dir) = open.pop() else {
        return;
    };
    let node = TreeNode::directory_with(dir.name, dir.path, dir.children);
    match open.last_mut() {
        Some(parent) => push_merged(&mut parent.children, node),
        None => push_merged(root, node),
    }
}
