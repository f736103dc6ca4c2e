use super::*;
use serde_json::json;

fn names(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(TreeNode::name).collect()
}

fn sample_canonical() -> Vec<TreeNode> {
    vec![
        TreeNode::directory_with(
            "src",
            "src",
            vec![
                TreeNode::file("index.js", "src/index.js"),
                TreeNode::directory_with(
                    "lib",
                    "src/lib",
                    vec![TreeNode::file("util.js", "src/lib/util.js")],
                ),
            ],
        ),
        TreeNode::file("README.md", "README.md"),
    ]
}

#[test]
fn test_all_shapes_normalize_to_the_same_tree() {
    let flat = json!(["src/index.js", "src/lib/util.js", "README.md"]);
    let indented = json!("src/\n  index.js\n  lib/\n    util.js\nREADME.md\n");
    let nested = json!([
        {
            "type": "directory",
            "name": "src",
            "path": "src",
            "children": [
                {"type": "file", "name": "index.js", "path": "src/index.js"},
                {
                    "type": "directory",
                    "name": "lib",
                    "path": "src/lib",
                    "children": [{"type": "file", "name": "util.js", "path": "src/lib/util.js"}]
                }
            ]
        },
        {"type": "file", "name": "README.md", "path": "README.md"}
    ]);
    let wrapped = json!({ "tree": nested.clone() });

    let expected = sample_canonical();
    assert_eq!(normalize(&flat), expected);
    assert_eq!(normalize(&indented), expected);
    assert_eq!(normalize(&nested), expected);
    assert_eq!(normalize(&wrapped), expected);
}

#[test]
fn test_normalize_is_idempotent_across_encodings() {
    let first = normalize(&json!([
        "src/index.js",
        "docs/",
        "src/lib/util.js",
        "Cargo.toml"
    ]));

    let as_nested = serde_json::to_value(&first).unwrap();
    assert_eq!(normalize(&as_nested), first);

    let as_text = json!(to_indented_text(&first));
    assert_eq!(normalize(&as_text), first);

    let as_flat = json!(to_flat_paths(&first));
    assert_eq!(normalize(&as_flat), first);
}

#[test]
fn test_duplicate_prefix_is_merged() {
    let tree = normalize(&json!(["a/b.js", "a/c.js"]));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name(), "a");
    assert_eq!(tree[0].kind(), NodeKind::Directory);
    assert_eq!(names(tree[0].children()), vec!["b.js", "c.js"]);
    assert_eq!(tree[0].children()[1].path(), "a/c.js");
}

#[test]
fn test_prefix_merge_ignores_input_order() {
    let tree = normalize(&json!(["a/x/1.js", "b.js", "a/2.js", "a/x/3.js"]));
    assert_eq!(names(&tree), vec!["a", "b.js"]);
    let a = &tree[0];
    assert_eq!(names(a.children()), vec!["x", "2.js"]);
    assert_eq!(names(a.children()[0].children()), vec!["1.js", "3.js"]);
}

#[test]
fn test_indentation_closes_nested_scopes() {
    let tree = normalize(&json!("a/\n  b/\n    c.js\nb/\n"));
    assert_eq!(
        tree,
        vec![
            TreeNode::directory_with(
                "a",
                "a",
                vec![TreeNode::directory_with(
                    "b",
                    "a/b",
                    vec![TreeNode::file("c.js", "a/b/c.js")]
                )]
            ),
            TreeNode::directory("b", "b"),
        ]
    );
}

#[test]
fn test_indented_skips_misaligned_and_unparseable_lines() {
    let text = "src/\n   odd.js\n  main.rs\n  has space.txt\n  ok/\n";
    let tree = normalize(&json!(text));
    assert_eq!(tree.len(), 1);
    assert_eq!(names(tree[0].children()), vec!["main.rs", "ok"]);
}

#[test]
fn test_indented_handles_crlf_and_blank_lines() {
    let tree = normalize(&json!("\r\nsrc/\r\n\r\n  main.rs\r\n"));
    assert_eq!(
        tree,
        vec![TreeNode::directory_with(
            "src",
            "src",
            vec![TreeNode::file("main.rs", "src/main.rs")]
        )]
    );
}

#[test]
fn test_indented_deep_jump_attaches_to_innermost_scope() {
    let tree = normalize(&json!("a/\n      deep.js\n"));
    assert_eq!(tree[0].children()[0].path(), "a/deep.js");
}

#[test]
fn test_nested_defaults_and_dropped_elements() {
    let tree = normalize(&json!([
        {"path": "src/main.rs"},
        {"type": "directory", "path": "empty"},
        42,
        "stray",
        {"type": "directory", "name": "lib", "children": [
            {"name": "mod.rs"},
            null
        ]},
        {"type": "file"}
    ]));

    assert_eq!(
        tree,
        vec![
            TreeNode::file("main.rs", "src/main.rs"),
            TreeNode::directory("empty", "empty"),
            TreeNode::directory_with("lib", "lib", vec![TreeNode::file("mod.rs", "lib/mod.rs")]),
        ]
    );
}

#[test]
fn test_nested_files_never_keep_children() {
    let tree = normalize(&json!([
        {"type": "file", "name": "a.txt", "path": "a.txt", "children": [{"name": "x"}]}
    ]));
    assert_eq!(tree, vec![TreeNode::file("a.txt", "a.txt")]);
}

#[test]
fn test_wrapper_prefers_tree_then_children() {
    let both = json!({"tree": ["a.js"], "children": ["b.js"]});
    assert_eq!(names(&normalize(&both)), vec!["a.js"]);

    let empty_tree = json!({"tree": [], "children": ["b.js"]});
    assert_eq!(names(&normalize(&empty_tree)), vec!["b.js"]);

    let neither = json!({"files": ["a.js"]});
    assert!(normalize(&neither).is_empty());

    let wrapped_text = json!({"children": "src/\n  a.js\n"});
    assert_eq!(normalize(&wrapped_text)[0].children()[0].path(), "src/a.js");
}

#[test]
fn test_unrecognized_shapes_yield_empty_tree() {
    for raw in [
        json!(null),
        json!(12),
        json!(true),
        json!(""),
        json!("   \n  "),
        json!([]),
        json!([1, 2, 3]),
    ] {
        assert!(normalize(&raw).is_empty(), "expected empty tree for {raw}");
    }
}

#[test]
fn test_flat_paths_with_surrounding_slashes() {
    let tree = normalize(&json!(["/src//main.rs/", "src/lib.rs"]));
    // A trailing slash marks a directory even for the last segment.
    assert_eq!(
        tree,
        vec![TreeNode::directory_with(
            "src",
            "src",
            vec![
                TreeNode::directory("main.rs", "src/main.rs"),
                TreeNode::file("lib.rs", "src/lib.rs"),
            ]
        )]
    );
}

#[test]
fn test_builder_upgrades_file_to_directory() {
    let mut builder = TreeBuilder::new();
    builder.insert_file("bin");
    builder.insert_file("bin/tool");
    builder.insert_dir("bin");
    let tree = builder.finish();
    assert_eq!(
        tree,
        vec![TreeNode::directory_with(
            "bin",
            "bin",
            vec![TreeNode::file("tool", "bin/tool")]
        )]
    );
}

#[test]
fn test_serialized_form_matches_client_contract() {
    let value = serde_json::to_value(sample_canonical()).unwrap();
    assert_eq!(value[0]["type"], "directory");
    assert_eq!(value[0]["children"][0]["type"], "file");
    assert!(value[1].get("children").is_none());
    assert_eq!(value[1]["path"], "README.md");
}

#[test]
fn test_raw_tree_classification_order() {
    assert_eq!(RawTree::classify(&json!("a/")).name(), "indented");
    assert_eq!(RawTree::classify(&json!({"tree": ["a"]})).name(), "wrapper");
    assert_eq!(RawTree::classify(&json!(["a", {"name": "b"}])).name(), "nested");
    assert_eq!(RawTree::classify(&json!(["a", "b"])).name(), "flat_paths");
    assert_eq!(RawTree::classify(&json!(3)).name(), "unrecognized");
}

#[test]
fn test_node_count() {
    let tree = sample_canonical();
    assert_eq!(tree.iter().map(TreeNode::count).sum::<usize>(), 5);
}

#[test]
fn test_repeated_directories_merge_in_every_shape() {
    let expected = vec![
        TreeNode::directory_with(
            "a",
            "a",
            vec![TreeNode::file("x.js", "a/x.js"), TreeNode::file("y.js", "a/y.js")],
        ),
        TreeNode::file("b.js", "b.js"),
    ];

    let nested = json!([
        {"type": "directory", "name": "a", "children": [{"name": "x.js"}]},
        {"type": "file", "name": "b.js"},
        {"type": "directory", "name": "a", "children": [{"name": "y.js"}]}
    ]);
    let indented = json!("a/\n  x.js\nb.js\na/\n  y.js\n");
    let flat = json!(["a/x.js", "b.js", "a/y.js"]);

    assert_eq!(normalize(&nested), expected);
    assert_eq!(normalize(&indented), expected);
    assert_eq!(normalize(&flat), expected);
}

#[test]
fn test_repeated_names_merge_recursively() {
    let nested = json!([
        {"type": "directory", "name": "src", "children": [
            {"type": "directory", "name": "lib", "children": [{"name": "a.rs"}]}
        ]},
        {"name": "src"},
        {"type": "directory", "name": "src", "children": [
            {"type": "directory", "name": "lib", "children": [{"name": "b.rs"}, {"name": "a.rs"}]}
        ]}
    ]);
    let tree = normalize(&nested);
    assert_eq!(names(&tree), vec!["src"]);
    let lib = &tree[0].children()[0];
    assert_eq!(lib.path(), "src/lib");
    assert_eq!(names(lib.children()), vec!["a.rs", "b.rs"]);
}
