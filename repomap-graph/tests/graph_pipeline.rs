//! End-to-end checks over the contents → tree → graph pipeline

use repomap_graph::{
    build_tree, compute_stats, project_to_graph, EntryKind, KindSelector, NodeFilter, NodeKind,
    RepoEntry, DEFAULT_FILE_COLOR,
};
use std::collections::HashMap;

fn entry(path: &str, kind: EntryKind) -> RepoEntry {
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    RepoEntry {
        path: path.to_string(),
        name,
        kind,
        size: None,
    }
}

fn sample_contents() -> HashMap<String, Vec<RepoEntry>> {
    let mut contents = HashMap::new();
    contents.insert(
        String::new(),
        vec![
            entry("src", EntryKind::Directory),
            entry("docs", EntryKind::Directory),
            entry("README.md", EntryKind::File),
            entry("Cargo.toml", EntryKind::File),
        ],
    );
    contents.insert(
        "src".to_string(),
        vec![
            entry("src/util", EntryKind::Directory),
            entry("src/main.rs", EntryKind::File),
        ],
    );
    contents.insert(
        "src/util".to_string(),
        vec![entry("src/util/helpers.rs", EntryKind::File)],
    );
    contents.insert(
        "docs".to_string(),
        vec![entry("docs/guide.md", EntryKind::File)],
    );
    contents
}

#[test]
fn graph_preserves_tree_shape() {
    let tree = build_tree(&sample_contents(), "repo");
    let graph = project_to_graph(&tree);

    // Every tree node becomes a graph node; a rooted tree has n - 1 edges
    assert_eq!(graph.nodes.len(), tree.node_count());
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);

    // Every edge endpoint resolves to a node, and edges point parent → child
    for edge in &graph.edges {
        assert!(graph.node_index(&edge.source).is_some());
        assert!(graph.node_index(&edge.target).is_some());
        let source_depth = graph.nodes[graph.node_index(&edge.source).unwrap()].depth;
        let target_depth = graph.nodes[graph.node_index(&edge.target).unwrap()].depth;
        assert_eq!(target_depth, source_depth + 1);
    }
}

#[test]
fn children_sort_directories_first_then_by_name() {
    let tree = build_tree(&sample_contents(), "repo");

    let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "src", "Cargo.toml", "README.md"]);

    for window in tree.children.windows(2) {
        let dir_rank = |n: &repomap_graph::TreeNode| n.kind != NodeKind::Directory;
        assert!(dir_rank(&window[0]) <= dir_rank(&window[1]));
    }
}

#[test]
fn projection_is_deterministic() {
    let contents = sample_contents();
    let first = project_to_graph(&build_tree(&contents, "repo"));
    let second = project_to_graph(&build_tree(&contents, "repo"));

    let ids: Vec<&String> = first.nodes.iter().map(|n| &n.id).collect();
    let ids_again: Vec<&String> = second.nodes.iter().map(|n| &n.id).collect();
    assert_eq!(ids, ids_again);

    for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
        assert_eq!(a.radius, b.radius);
        assert_eq!(a.color, b.color);
        assert_eq!(a.depth, b.depth);
    }
}

#[test]
fn filters_combine_conjunctively() {
    let tree = build_tree(&sample_contents(), "repo");
    let graph = project_to_graph(&tree);

    let search_only = NodeFilter {
        search: Some("guide".to_string()),
        kind: None,
    };
    let kind_only = NodeFilter {
        search: None,
        kind: Some(KindSelector::Extension("md".to_string())),
    };
    let combined = NodeFilter {
        search: Some("guide".to_string()),
        kind: Some(KindSelector::Extension("md".to_string())),
    };

    let visible = |f: &NodeFilter| {
        graph
            .nodes
            .iter()
            .filter(|n| f.passes(n))
            .map(|n| n.id.clone())
            .collect::<Vec<_>>()
    };

    let both = visible(&combined);
    assert_eq!(both, vec!["docs/guide.md".to_string()]);
    // The conjunction never shows a node either filter alone would hide
    for id in &both {
        assert!(visible(&search_only).contains(id));
        assert!(visible(&kind_only).contains(id));
    }
}

#[test]
fn empty_repository_yields_lone_root() {
    let mut contents = HashMap::new();
    contents.insert(String::new(), Vec::new());

    let tree = build_tree(&contents, "empty");
    let graph = project_to_graph(&tree);

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes[0].name, "empty");
    assert_eq!(graph.nodes[0].kind, NodeKind::Directory);

    let stats = compute_stats(&tree);
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.total_directories, 1);
}

#[test]
fn single_nested_file_forms_a_chain() {
    let mut contents = HashMap::new();
    contents.insert(String::new(), vec![entry("src", EntryKind::Directory)]);
    contents.insert(
        "src".to_string(),
        vec![entry("src/index.ts", EntryKind::File)],
    );

    let tree = build_tree(&contents, "repo");
    let graph = project_to_graph(&tree);

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);

    let leaf = &graph.nodes[graph.node_index("src/index.ts").unwrap()];
    assert_eq!(leaf.extension, "ts");
    assert_eq!(leaf.depth, 2);
}

#[test]
fn extensionless_file_gets_default_color() {
    let mut contents = HashMap::new();
    contents.insert(String::new(), vec![entry("LICENSE", EntryKind::File)]);

    let tree = build_tree(&contents, "repo");
    let graph = project_to_graph(&tree);

    let node = &graph.nodes[graph.node_index("LICENSE").unwrap()];
    assert_eq!(node.extension, "");
    assert_eq!(node.color, DEFAULT_FILE_COLOR);
}
