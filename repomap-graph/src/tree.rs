//! Tree builder
//!
//! Converts the fetched path→entries mapping into a rooted tree. The
//! traversal uses an explicit worklist rather than recursion, so the depth
//! reached is a plain consequence of which directories the fetcher listed: a
//! directory path missing from the mapping yields a childless node, not an
//! error.

use repomap_repo::{EntryKind, RepoEntry};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Directory,
    File,
}

/// One file-system entry in the repository tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique path id; empty string for the root
    pub id: String,
    /// Final path segment
    pub name: String,
    pub kind: NodeKind,
    /// Substring after the last `.` in the name; empty for directories and
    /// extensionless files
    pub extension: String,
    /// Directories first, then lexicographic by name
    pub children: Vec<TreeNode>,
    /// UI expansion state, mutated only by the interaction layer
    pub expanded: bool,
}

impl TreeNode {
    fn directory(id: String, name: String) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Directory,
            extension: String::new(),
            children: Vec::new(),
            expanded: false,
        }
    }

    fn file(id: String, name: String) -> Self {
        let extension = file_extension(&name);
        Self {
            id,
            name,
            kind: NodeKind::File,
            extension,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Total node count including self
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Extension of a file name: substring after the last `.`, empty when the
/// name contains no dot
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) => name[pos + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Build the repository tree from a path→entries mapping.
///
/// The root is the empty path. Entries at each level are ordered directories
/// first, then lexicographically by name, so repeated builds over the same
/// mapping produce identical trees.
pub fn build_tree(contents: &HashMap<String, Vec<RepoEntry>>, root_name: &str) -> TreeNode {
    // Arena-based assembly: children always land at higher indices than
    // their parent, so one reverse pass folds the arena into a tree.
    let mut nodes: Vec<Option<TreeNode>> = vec![Some(TreeNode::directory(
        String::new(),
        root_name.to_string(),
    ))];
    let mut parents: Vec<usize> = vec![0];

    let mut worklist: Vec<(usize, String)> = vec![(0, String::new())];
    let mut listed: HashSet<String> = HashSet::new();

    while let Some((parent_idx, path)) = worklist.pop() {
        // A mapping whose listings point back at an already-expanded path
        // would otherwise grow the arena forever; the repeat stays childless.
        if !listed.insert(path.clone()) {
            continue;
        }
        let Some(entries) = contents.get(&path) else {
            // Directory was never listed (depth bound reached or the listing
            // failed); it stays childless.
            continue;
        };

        let mut ordered: Vec<&RepoEntry> = entries.iter().collect();
        ordered.sort_by_key(|entry| (entry.kind != EntryKind::Directory, entry.name.clone()));

        for entry in ordered {
            let node = match entry.kind {
                EntryKind::Directory => {
                    TreeNode::directory(entry.path.clone(), entry.name.clone())
                }
                EntryKind::File => TreeNode::file(entry.path.clone(), entry.name.clone()),
            };
            let idx = nodes.len();
            nodes.push(Some(node));
            parents.push(parent_idx);

            if entry.kind == EntryKind::Directory {
                worklist.push((idx, entry.path.clone()));
            }
        }
    }

    // Fold children into parents. Walking indices in reverse pushes each
    // parent's children in reverse insertion order, so every child list gets
    // one final reversal back into sorted order.
    for idx in (1..nodes.len()).rev() {
        let mut node = nodes[idx].take().expect("arena slot consumed twice");
        node.children.reverse();
        nodes[parents[idx]]
            .as_mut()
            .expect("parent slot consumed before child")
            .children
            .push(node);
    }

    let mut root = nodes[0].take().expect("arena root missing");
    root.children.reverse();
    root
}
