//! Repository statistics derived from the built tree

use crate::tree::{NodeKind, TreeNode};
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate numbers for the statistics dashboard
#[derive(Debug, Clone, Serialize)]
pub struct RepoStats {
    pub total_files: usize,
    pub total_directories: usize,
    /// Deepest node, root counted as depth 0
    pub max_depth: usize,
    /// Extension → file count; extensionless files are grouped under the
    /// empty string
    pub file_types: HashMap<String, usize>,
}

impl RepoStats {
    pub fn total_nodes(&self) -> usize {
        self.total_files + self.total_directories
    }

    /// File types sorted by count descending, name ascending as tiebreak
    pub fn top_file_types(&self, limit: usize) -> Vec<(String, usize)> {
        let mut types: Vec<(String, usize)> = self
            .file_types
            .iter()
            .map(|(ext, count)| (ext.clone(), *count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        types.truncate(limit);
        types
    }
}

/// Walk the tree once and collect counts
pub fn compute_stats(root: &TreeNode) -> RepoStats {
    let mut stats = RepoStats {
        total_files: 0,
        total_directories: 0,
        max_depth: 0,
        file_types: HashMap::new(),
    };

    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        stats.max_depth = stats.max_depth.max(depth);
        match node.kind {
            NodeKind::Directory => stats.total_directories += 1,
            NodeKind::File => {
                stats.total_files += 1;
                *stats.file_types.entry(node.extension.clone()).or_insert(0) += 1;
            }
        }
        for child in &node.children {
            stack.push((child, depth + 1));
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;
    use repomap_repo::{EntryKind, RepoEntry};
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

    #[test]
    fn counts_match_tree_contents() {
        let mut contents = HashMap::new();
        contents.insert(
            String::new(),
            vec![
                entry("src", EntryKind::Directory),
                entry("README.md", EntryKind::File),
                entry("LICENSE", EntryKind::File),
            ],
        );
        contents.insert(
            "src".to_string(),
            vec![
                entry("src/main.rs", EntryKind::File),
                entry("src/lib.rs", EntryKind::File),
            ],
        );

        let tree = build_tree(&contents, "repo");
        let stats = compute_stats(&tree);

        assert_eq!(stats.total_directories, 2);
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_nodes(), tree.node_count());
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.file_types.get("rs"), Some(&2));
        assert_eq!(stats.file_types.get("md"), Some(&1));
        // LICENSE has no extension
        assert_eq!(stats.file_types.get(""), Some(&1));
    }

    #[test]
    fn top_file_types_orders_by_count_then_name() {
        let mut contents = HashMap::new();
        contents.insert(
            String::new(),
            vec![
                entry("a.rs", EntryKind::File),
                entry("b.rs", EntryKind::File),
                entry("c.md", EntryKind::File),
                entry("d.ts", EntryKind::File),
            ],
        );

        let tree = build_tree(&contents, "repo");
        let stats = compute_stats(&tree);
        let top = stats.top_file_types(2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("rs".to_string(), 2));
        // md and ts tie at 1, md wins alphabetically
        assert_eq!(top[1], ("md".to_string(), 1));
    }
}
