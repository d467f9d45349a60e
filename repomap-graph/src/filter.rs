//! Search and type filters
//!
//! Both filters are pure per-node predicates. They are evaluated
//! independently; when both are active a node stays visible only if it
//! satisfies both.

use crate::project::GraphNode;
use crate::tree::NodeKind;

/// Opacity applied to nodes that fail the active filters or fall outside a
/// hover highlight
pub const DIMMED_OPACITY: f32 = 0.15;

/// Kind/extension selector for the type filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindSelector {
    Directories,
    /// Files with this exact extension (lowercase, without the dot)
    Extension(String),
}

/// Active filter state
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    /// Case-insensitive "name contains" match
    pub search: Option<String>,
    pub kind: Option<KindSelector>,
}

impl NodeFilter {
    pub fn is_active(&self) -> bool {
        self.search.as_deref().map(|s| !s.is_empty()).unwrap_or(false) || self.kind.is_some()
    }

    fn passes_search(&self, node: &GraphNode) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => node
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn passes_kind(&self, node: &GraphNode) -> bool {
        match &self.kind {
            None => true,
            Some(KindSelector::Directories) => node.kind == NodeKind::Directory,
            Some(KindSelector::Extension(ext)) => {
                node.kind == NodeKind::File && node.extension == *ext
            }
        }
    }

    /// A node is visible iff it passes both predicates
    pub fn passes(&self, node: &GraphNode) -> bool {
        self.passes_search(node) && self.passes_kind(node)
    }

    /// Opacity for a node under this filter
    pub fn opacity(&self, node: &GraphNode) -> f32 {
        if self.passes(node) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }
}
