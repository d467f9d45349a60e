//! Repomap Graph - Tree and graph model
//!
//! Builds the repository tree from fetched contents, projects it to a
//! force-directed graph model, and provides the pure view computations
//! (filters, hover sets, statistics) the presentation layer renders from.

pub mod filter;
pub mod palette;
pub mod project;
pub mod stats;
pub mod tree;
pub mod view;

pub use filter::{KindSelector, NodeFilter, DIMMED_OPACITY};
pub use repomap_repo::{EntryKind, RepoEntry};
pub use palette::{file_color, ACCENT_COLOR, DEFAULT_FILE_COLOR, DIRECTORY_COLOR};
pub use project::{project_to_graph, project_with_link_step, GraphData, GraphEdge, GraphNode};
pub use stats::{compute_stats, RepoStats};
pub use tree::{build_tree, file_extension, NodeKind, TreeNode};
pub use view::{connection_count, inspect, neighbor_set, resolve_style, Camera, NodeDetails, NodeStyle};
