//! Static exports of a settled layout
//!
//! The SVG export renders the graph as it would appear on screen (dark
//! background, colored circles, dimming from the active filters). The DOT
//! export carries structure only and leaves positioning to Graphviz.

use repomap_graph::{resolve_style, GraphData, NodeFilter, NodeKind};
use std::fmt::Write as _;

const BACKGROUND: &str = "#0d1117";
const EDGE_COLOR: &str = "#30363d";
const LABEL_COLOR: &str = "#c9d1d9";
const PADDING: f32 = 40.0;

/// Render the laid-out graph as a standalone SVG document
pub fn render_svg(graph: &GraphData, filter: &NodeFilter) -> String {
    let (min_x, min_y, max_x, max_y) = bounds(graph);
    let ox = PADDING - min_x;
    let oy = PADDING - min_y;
    let width = max_x - min_x + 2.0 * PADDING;
    let height = max_y - min_y + 2.0 * PADDING;

    let mut svg = String::with_capacity(16 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">
<rect width="{width:.0}" height="{height:.0}" fill="{BACKGROUND}"/>
"#
    );

    for edge in &graph.edges {
        let (Some(s), Some(t)) = (graph.node_index(&edge.source), graph.node_index(&edge.target))
        else {
            continue;
        };
        let (a, b) = (&graph.nodes[s], &graph.nodes[t]);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{EDGE_COLOR}" stroke-width="1"/>"#,
            a.x + ox,
            a.y + oy,
            b.x + ox,
            b.y + oy,
        );
    }

    for node in &graph.nodes {
        let style = resolve_style(node, None, filter);
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" opacity="{:.2}"/>"#,
            node.x + ox,
            node.y + oy,
            node.radius,
            node.color,
            style.opacity,
        );
        // Labels only for directories, to keep dense file clusters legible
        if node.kind == NodeKind::Directory {
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="{LABEL_COLOR}" opacity="{:.2}">{}</text>"#,
                node.x + ox,
                node.y + oy - node.radius - 4.0,
                style.opacity,
                escape_xml(&node.name),
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Graphviz DOT export, structure only
pub fn render_dot(graph: &GraphData, name: &str) -> String {
    let mut dot = String::with_capacity(8 * 1024);
    let _ = writeln!(dot, "digraph {} {{", quote(name));
    dot.push_str("  rankdir=TB;\n  node [shape=circle style=filled];\n");

    for node in &graph.nodes {
        let shape = match node.kind {
            NodeKind::Directory => "folder",
            NodeKind::File => "note",
        };
        let _ = writeln!(
            dot,
            "  {} [label={} shape={} fillcolor={}];",
            quote(&node.id),
            quote(&node.name),
            shape,
            quote(&node.color),
        );
    }
    for edge in &graph.edges {
        let _ = writeln!(dot, "  {} -> {};", quote(&edge.source), quote(&edge.target));
    }

    dot.push_str("}\n");
    dot
}

fn bounds(graph: &GraphData) -> (f32, f32, f32, f32) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for node in &graph.nodes {
        min_x = min_x.min(node.x - node.radius);
        min_y = min_y.min(node.y - node.radius);
        max_x = max_x.max(node.x + node.radius);
        max_y = max_y.max(node.y + node.radius);
    }
    if graph.nodes.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    (min_x, min_y, max_x, max_y)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}
