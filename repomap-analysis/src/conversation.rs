//! Analysis conversation
//!
//! The analysis screen plays a short multi-turn exchange between named
//! agents. The default path is fully scripted from the fetched data and is
//! deterministic. When a generative endpoint is configured, its free-text
//! response is scanned for an embedded JSON array of turns; any parse
//! failure falls back to the scripted conversation without surfacing an
//! error.

use repomap_graph::RepoStats;
use repomap_repo::RepoData;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One line of the analysis exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub agent: String,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(agent: &str, content: String) -> Self {
        Self {
            agent: agent.to_string(),
            content,
        }
    }
}

const SCOUT: &str = "Scout";
const ARCHITECT: &str = "Architect";
const ANALYST: &str = "Analyst";

/// Build the deterministic scripted conversation from fetched data
pub fn scripted_conversation(data: &RepoData, stats: &RepoStats) -> Vec<ConversationTurn> {
    let mut turns = Vec::new();

    turns.push(ConversationTurn::new(
        SCOUT,
        format!(
            "Pulled down {}. Default branch is {}, primary language {}.",
            data.info.slug(),
            data.metadata.default_branch,
            data.metadata
                .language
                .as_deref()
                .unwrap_or("not reported"),
        ),
    ));

    if let Some(description) = data
        .metadata
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        turns.push(ConversationTurn::new(
            SCOUT,
            format!("The project describes itself as: {}", description),
        ));
    }

    turns.push(ConversationTurn::new(
        ARCHITECT,
        format!(
            "The tree has {} directories and {} files, reaching {} levels deep.",
            stats.total_directories, stats.total_files, stats.max_depth,
        ),
    ));

    let top_types = stats.top_file_types(3);
    if !top_types.is_empty() {
        let summary = top_types
            .iter()
            .map(|(ext, count)| {
                if ext.is_empty() {
                    format!("{} extensionless", count)
                } else {
                    format!("{} .{}", count, ext)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        turns.push(ConversationTurn::new(
            ARCHITECT,
            format!("Most common file types: {}.", summary),
        ));
    }

    turns.push(ConversationTurn::new(
        ANALYST,
        format!(
            "Community signals: {} stars, {} forks, {} open issues, {} contributors fetched.",
            data.metadata.stars,
            data.metadata.forks,
            data.metadata.open_issues,
            data.contributors.len(),
        ),
    ));

    if !data.branches.is_empty() {
        turns.push(ConversationTurn::new(
            ANALYST,
            format!("{} branches are visible on the remote.", data.branches.len()),
        ));
    }

    turns.push(ConversationTurn::new(
        SCOUT,
        "Map is ready. Switching to the visualization.".to_string(),
    ));

    turns
}

/// Scan free text for an embedded JSON array of conversation turns.
///
/// Generative endpoints tend to wrap their JSON in prose or code fences, so
/// this walks the text for a bracket-balanced array candidate and tries to
/// deserialize each one. Returns `None` when no candidate parses into a
/// non-empty list of turns.
pub fn extract_conversation(text: &str) -> Option<Vec<ConversationTurn>> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while let Some(offset) = text[start..].find('[') {
        let open = start + offset;
        if let Some(close) = matching_bracket(bytes, open) {
            let candidate = &text[open..=close];
            match serde_json::from_str::<Vec<ConversationTurn>>(candidate) {
                Ok(turns) if !turns.is_empty() => {
                    debug!(turns = turns.len(), "extracted conversation from response");
                    return Some(turns);
                }
                _ => {}
            }
        }
        start = open + 1;
    }

    None
}

/// Index of the `]` that balances the `[` at `open`, honoring JSON string
/// escapes so brackets inside contents do not count
fn matching_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomap_core::RepoInfo;
    use repomap_graph::{build_tree, compute_stats, EntryKind, RepoEntry};
    use repomap_repo::RepositoryMetadata;
    use std::collections::HashMap;

    fn sample_data() -> (RepoData, RepoStats) {
        let mut contents = HashMap::new();
        contents.insert(
            String::new(),
            vec![
                RepoEntry {
                    path: "src".to_string(),
                    name: "src".to_string(),
                    kind: EntryKind::Directory,
                    size: None,
                },
                RepoEntry {
                    path: "README.md".to_string(),
                    name: "README.md".to_string(),
                    kind: EntryKind::File,
                    size: Some(120),
                },
            ],
        );
        contents.insert(
            "src".to_string(),
            vec![RepoEntry {
                path: "src/main.rs".to_string(),
                name: "main.rs".to_string(),
                kind: EntryKind::File,
                size: Some(512),
            }],
        );

        let stats = compute_stats(&build_tree(&contents, "demo"));
        let data = RepoData {
            info: RepoInfo {
                owner: "octocat".to_string(),
                name: "demo".to_string(),
                url: "https://github.com/octocat/demo".to_string(),
            },
            metadata: RepositoryMetadata {
                name: "demo".to_string(),
                description: Some("A demo repository".to_string()),
                default_branch: "main".to_string(),
                language: Some("Rust".to_string()),
                topics: vec![],
                stars: 42,
                forks: 7,
                open_issues: 3,
                size: Some(100),
                private: false,
            },
            branches: vec![],
            contributors: vec![],
            readme: None,
            contents,
        };
        (data, stats)
    }

    #[test]
    fn scripted_conversation_is_deterministic() {
        let (data, stats) = sample_data();
        let first = scripted_conversation(&data, &stats);
        let second = scripted_conversation(&data, &stats);
        assert_eq!(first, second);
        assert!(first.len() >= 4);
        assert!(first[0].content.contains("octocat/demo"));
    }

    #[test]
    fn scripted_conversation_reflects_statistics() {
        let (data, stats) = sample_data();
        let turns = scripted_conversation(&data, &stats);
        let architect: Vec<&ConversationTurn> =
            turns.iter().filter(|t| t.agent == ARCHITECT).collect();
        assert!(!architect.is_empty());
        assert!(architect[0].content.contains("2 directories"));
        assert!(architect[0].content.contains("2 files"));
    }

    #[test]
    fn extracts_array_embedded_in_prose() {
        let text = r#"Sure! Here is the analysis you asked for:

```json
[
  {"agent": "Scout", "content": "Found 10 files."},
  {"agent": "Analyst", "content": "Mostly Rust [see src]."}
]
```

Let me know if you need anything else."#;

        let turns = extract_conversation(text).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].agent, "Scout");
        assert_eq!(turns[1].content, "Mostly Rust [see src].");
    }

    #[test]
    fn skips_non_conversation_arrays() {
        let text = r#"The sizes are [1, 2, 3] but the turns are
[{"agent": "A", "content": "hi"}]"#;
        let turns = extract_conversation(text).unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].agent, "A");
    }

    #[test]
    fn garbage_yields_none() {
        assert!(extract_conversation("no json here").is_none());
        assert!(extract_conversation("[1, 2, broken").is_none());
        assert!(extract_conversation("[]").is_none());
    }
}
