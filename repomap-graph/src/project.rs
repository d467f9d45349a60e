//! Graph projector
//!
//! Flattens a repository tree into node and edge lists for the force layout.
//! The traversal is pre-order over the tree's already-sorted children, so the
//! output order is stable across calls: re-renders without data changes are
//! visually stable modulo the physics simulation.

use crate::palette::{file_color, DIRECTORY_COLOR};
use crate::tree::{NodeKind, TreeNode};
use serde::{Deserialize, Serialize};

/// Projection of one tree node for layout purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Shared with the tree node
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub extension: String,
    /// Root is depth 0
    pub depth: usize,
    /// Visual radius, attenuated by depth
    pub radius: f32,
    /// Fill color from the extension palette (fixed hue for directories)
    pub color: String,
    /// Position, owned by the layout engine while a simulation runs
    pub x: f32,
    pub y: f32,
    /// Pinned position set on drag-start and cleared on drag-end
    pub fx: Option<f32>,
    pub fy: Option<f32>,
}

/// Directed parent→child edge with spring hints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Target spring length; grows with depth so deeper subtrees spread out
    pub distance: f32,
    pub strength: f32,
}

/// Node and edge lists produced by one projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}

// Presentation tuning. Radii must be monotone non-increasing in depth and
// strictly larger for directories than for same-depth files.
const DIRECTORY_BASE_RADIUS: f32 = 18.0;
const DIRECTORY_RADIUS_STEP: f32 = 1.5;
const DIRECTORY_MIN_RADIUS: f32 = 9.0;
const FILE_BASE_RADIUS: f32 = 11.0;
const FILE_RADIUS_STEP: f32 = 1.0;
const FILE_MIN_RADIUS: f32 = 5.0;

const BASE_LINK_DISTANCE: f32 = 50.0;
const LINK_DISTANCE_STEP: f32 = 20.0;
const LINK_STRENGTH: f32 = 0.7;

fn node_radius(kind: NodeKind, depth: usize) -> f32 {
    match kind {
        NodeKind::Directory => {
            (DIRECTORY_BASE_RADIUS - DIRECTORY_RADIUS_STEP * depth as f32).max(DIRECTORY_MIN_RADIUS)
        }
        NodeKind::File => (FILE_BASE_RADIUS - FILE_RADIUS_STEP * depth as f32).max(FILE_MIN_RADIUS),
    }
}

fn node_color(node: &TreeNode) -> String {
    match node.kind {
        NodeKind::Directory => DIRECTORY_COLOR.to_string(),
        NodeKind::File => file_color(&node.extension).to_string(),
    }
}

/// Project a tree into `(nodes, edges)` with the default depth spread.
///
/// One node per tree node; one edge per non-root node, from its parent.
pub fn project_to_graph(root: &TreeNode) -> GraphData {
    project_with_link_step(root, LINK_DISTANCE_STEP)
}

/// Projection with a caller-supplied per-depth spring length increment,
/// the layout configuration's tuning knob
pub fn project_with_link_step(root: &TreeNode, link_distance_step: f32) -> GraphData {
    let mut graph = GraphData::default();

    // Explicit pre-order stack; children pushed in reverse keeps pop order
    // equal to the tree's sorted order.
    let mut stack: Vec<(&TreeNode, usize, Option<&str>)> = vec![(root, 0, None)];

    while let Some((node, depth, parent_id)) = stack.pop() {
        graph.nodes.push(GraphNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            extension: node.extension.clone(),
            depth,
            radius: node_radius(node.kind, depth),
            color: node_color(node),
            x: 0.0,
            y: 0.0,
            fx: None,
            fy: None,
        });

        if let Some(parent_id) = parent_id {
            graph.edges.push(GraphEdge {
                source: parent_id.to_string(),
                target: node.id.clone(),
                distance: BASE_LINK_DISTANCE + link_distance_step * depth as f32,
                strength: LINK_STRENGTH,
            });
        }

        for child in node.children.iter().rev() {
            stack.push((child, depth + 1, Some(node.id.as_str())));
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, name: &str) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::File,
            extension: crate::tree::file_extension(name),
            children: vec![],
            expanded: false,
        }
    }

    fn dir(id: &str, name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::Directory,
            extension: String::new(),
            children,
            expanded: false,
        }
    }

    #[test]
    fn radii_are_monotone_and_directory_dominant() {
        for depth in 0..10 {
            assert!(node_radius(NodeKind::Directory, depth) >= node_radius(NodeKind::Directory, depth + 1));
            assert!(node_radius(NodeKind::File, depth) >= node_radius(NodeKind::File, depth + 1));
            assert!(
                node_radius(NodeKind::Directory, depth) > node_radius(NodeKind::File, depth),
                "directory must out-size same-depth file at depth {}",
                depth
            );
        }
    }

    #[test]
    fn preorder_emits_parents_before_children() {
        let tree = dir(
            "",
            "repo",
            vec![dir("src", "src", vec![leaf("src/a.ts", "a.ts")])],
        );
        let graph = project_to_graph(&tree);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["", "src", "src/a.ts"]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].source, "");
        assert_eq!(graph.edges[0].target, "src");
    }

    #[test]
    fn edge_distance_grows_with_depth() {
        let tree = dir(
            "",
            "repo",
            vec![dir("a", "a", vec![dir("a/b", "b", vec![leaf("a/b/c.rs", "c.rs")])])],
        );
        let graph = project_to_graph(&tree);
        let distances: Vec<f32> = graph.edges.iter().map(|e| e.distance).collect();
        for pair in distances.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn link_step_widens_the_depth_spread() {
        let tree = dir(
            "",
            "repo",
            vec![dir("a", "a", vec![leaf("a/b.rs", "b.rs")])],
        );
        let narrow = project_with_link_step(&tree, 5.0);
        let wide = project_with_link_step(&tree, 50.0);

        let spread = |g: &GraphData| g.edges[1].distance - g.edges[0].distance;
        assert_eq!(spread(&narrow), 5.0);
        assert_eq!(spread(&wide), 50.0);
    }
}
