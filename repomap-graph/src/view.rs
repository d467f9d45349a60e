//! View-side interaction helpers
//!
//! Zoom clamping, hover highlighting, and click-to-inspect. All of these are
//! pure view computations; none of them mutates node data.

use crate::filter::{NodeFilter, DIMMED_OPACITY};
use crate::palette::ACCENT_COLOR;
use crate::project::{GraphData, GraphNode};
use crate::tree::NodeKind;
use std::collections::HashSet;

/// Camera state for zoom bounds enforcement
#[derive(Debug, Clone)]
pub struct Camera {
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub current_zoom: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 10.0,
            current_zoom: 1.0,
        }
    }

    /// Clamp a zoom value to the allowed range
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    /// Apply a zoom change, keeping the factor inside the bounds
    pub fn set_zoom(&mut self, zoom: f32) {
        self.current_zoom = self.clamp(zoom);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// The hovered node plus every node one edge away from it
pub fn neighbor_set(graph: &GraphData, id: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    set.insert(id.to_string());
    for edge in &graph.edges {
        if edge.source == id {
            set.insert(edge.target.clone());
        } else if edge.target == id {
            set.insert(edge.source.clone());
        }
    }
    set
}

/// Number of edges incident to a node
pub fn connection_count(graph: &GraphData, id: &str) -> usize {
    graph
        .edges
        .iter()
        .filter(|edge| edge.source == id || edge.target == id)
        .count()
}

/// Resolved render style for one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub opacity: f32,
    /// Accent stroke color, set only for the hover-connected subset
    pub stroke: Option<&'static str>,
}

/// Resolve a node's style under the current hover set and filters.
///
/// With no hover active, opacity comes from the filters alone (uniform full
/// opacity when the filters are inactive). With a hover active, the
/// connected subset renders at full opacity with an accent and everything
/// else is dimmed; a hovered node still has to pass the filters to escape
/// dimming.
pub fn resolve_style(
    node: &GraphNode,
    hover: Option<&HashSet<String>>,
    filter: &NodeFilter,
) -> NodeStyle {
    let filter_opacity = filter.opacity(node);

    match hover {
        None => NodeStyle {
            opacity: filter_opacity,
            stroke: None,
        },
        Some(connected) => {
            if connected.contains(&node.id) {
                NodeStyle {
                    opacity: filter_opacity,
                    stroke: Some(ACCENT_COLOR),
                }
            } else {
                NodeStyle {
                    opacity: DIMMED_OPACITY.min(filter_opacity),
                    stroke: None,
                }
            }
        }
    }
}

/// Side-panel metadata for a clicked node
#[derive(Debug, Clone)]
pub struct NodeDetails {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub extension: String,
    pub depth: usize,
    /// Number of incident edges
    pub connection_count: usize,
}

/// Click-to-inspect: metadata for the selected node, if it exists
pub fn inspect(graph: &GraphData, id: &str) -> Option<NodeDetails> {
    let node = graph.nodes.iter().find(|n| n.id == id)?;
    Some(NodeDetails {
        id: node.id.clone(),
        name: node.name.clone(),
        kind: node.kind,
        extension: node.extension.clone(),
        depth: node.depth,
        connection_count: connection_count(graph, id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project_to_graph;
    use crate::tree::TreeNode;

    fn sample_graph() -> GraphData {
        let tree = TreeNode {
            id: String::new(),
            name: "repo".to_string(),
            kind: NodeKind::Directory,
            extension: String::new(),
            expanded: false,
            children: vec![
                TreeNode {
                    id: "src".to_string(),
                    name: "src".to_string(),
                    kind: NodeKind::Directory,
                    extension: String::new(),
                    expanded: false,
                    children: vec![TreeNode {
                        id: "src/a.rs".to_string(),
                        name: "a.rs".to_string(),
                        kind: NodeKind::File,
                        extension: "rs".to_string(),
                        expanded: false,
                        children: vec![],
                    }],
                },
                TreeNode {
                    id: "README.md".to_string(),
                    name: "README.md".to_string(),
                    kind: NodeKind::File,
                    extension: "md".to_string(),
                    expanded: false,
                    children: vec![],
                },
            ],
        };
        project_to_graph(&tree)
    }

    #[test]
    fn camera_clamps_to_documented_bounds() {
        let mut camera = Camera::new();
        camera.set_zoom(100.0);
        assert_eq!(camera.current_zoom, camera.zoom_max);
        camera.set_zoom(0.0);
        assert_eq!(camera.current_zoom, camera.zoom_min);
        camera.set_zoom(2.5);
        assert_eq!(camera.current_zoom, 2.5);
    }

    #[test]
    fn neighbor_set_is_one_edge_plus_self() {
        let graph = sample_graph();
        let set = neighbor_set(&graph, "src");
        // src itself, its parent (root), and its child
        assert_eq!(set.len(), 3);
        assert!(set.contains("src"));
        assert!(set.contains(""));
        assert!(set.contains("src/a.rs"));
        assert!(!set.contains("README.md"));
    }

    #[test]
    fn hover_dims_unconnected_and_accents_connected() {
        let graph = sample_graph();
        let set = neighbor_set(&graph, "src");
        let filter = NodeFilter::default();

        let src = graph.nodes.iter().find(|n| n.id == "src").unwrap();
        let readme = graph.nodes.iter().find(|n| n.id == "README.md").unwrap();

        let src_style = resolve_style(src, Some(&set), &filter);
        assert_eq!(src_style.opacity, 1.0);
        assert_eq!(src_style.stroke, Some(ACCENT_COLOR));

        let readme_style = resolve_style(readme, Some(&set), &filter);
        assert_eq!(readme_style.opacity, DIMMED_OPACITY);
        assert_eq!(readme_style.stroke, None);

        // Hover-end restores uniform full opacity
        let reset = resolve_style(readme, None, &filter);
        assert_eq!(reset.opacity, 1.0);
        assert_eq!(reset.stroke, None);
    }

    #[test]
    fn inspect_reports_connection_count() {
        let graph = sample_graph();
        let details = inspect(&graph, "src").unwrap();
        assert_eq!(details.kind, NodeKind::Directory);
        assert_eq!(details.connection_count, 2);

        let leaf = inspect(&graph, "src/a.rs").unwrap();
        assert_eq!(leaf.connection_count, 1);
        assert_eq!(leaf.extension, "rs");

        assert!(inspect(&graph, "missing").is_none());
    }
}
