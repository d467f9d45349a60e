//! Repomap Layout - Force-directed positioning
//!
//! Runs the alpha-cooled force simulation over a projected graph and renders
//! settled layouts to SVG or Graphviz DOT.

pub mod export;
pub mod forces;
pub mod simulation;

pub use export::{render_dot, render_svg};
pub use simulation::{layout_graph, ForceSimulation, SimLink, SimNode};
