//! Repository fetcher
//!
//! Walks the contents endpoint breadth-first with a visible depth bound,
//! reporting progress after every remote call. Subtrees whose listing fails
//! are left absent rather than aborting the fetch.

use crate::api::{
    ApiClientConfig, Branch, Contributor, EntryKind, GitHubApiClient, RepoEntry,
    RepositoryApiClient, RepositoryMetadata,
};
use futures::stream::{self, StreamExt};
use repomap_core::{
    ErrorContext, FetchConfig, FetchPhase, ProgressReporter, RepoInfo, RepomapError,
    RepomapResult,
};
use std::collections::HashMap;
use tracing::{info, warn};
use url::Url;

/// Everything a single fetch produces: the metadata record plus the
/// path→entries mapping the tree builder consumes
#[derive(Debug, Clone)]
pub struct RepoData {
    pub info: RepoInfo,
    pub metadata: RepositoryMetadata,
    pub branches: Vec<Branch>,
    pub contributors: Vec<Contributor>,
    pub readme: Option<String>,
    /// Directory path → entries, present only for traversed directories
    pub contents: HashMap<String, Vec<RepoEntry>>,
}

impl RepoData {
    /// Total number of entries across all traversed directories
    pub fn entry_count(&self) -> usize {
        self.contents.values().map(|entries| entries.len()).sum()
    }
}

/// Parse a repository URL or `owner/name` slug into coordinates.
///
/// Rejected before any network call: malformed input, non-GitHub hosts, and
/// paths without both owner and repository segments.
pub fn parse_repo_url(url_or_slug: &str) -> RepomapResult<RepoInfo> {
    // A bare slug is shorthand for the github.com URL
    let expanded;
    let input = if !url_or_slug.contains("://")
        && url_or_slug.matches('/').count() == 1
        && !url_or_slug.contains(char::is_whitespace)
    {
        expanded = format!("https://github.com/{}", url_or_slug);
        &expanded
    } else {
        url_or_slug
    };

    let parsed_url = Url::parse(input).map_err(|e| RepomapError::Validation {
        message: format!("Invalid repository URL: {}", e),
        field: Some("repository_url".to_string()),
        context: ErrorContext::new("fetcher")
            .with_operation("parse_repo_url")
            .with_suggestion("Expected format: https://github.com/owner/repo"),
    })?;

    let host = parsed_url.host_str().unwrap_or_default();
    if host != "github.com" && host != "www.github.com" {
        return Err(RepomapError::Validation {
            message: format!("Unsupported repository host: {}", host),
            field: Some("repository_url".to_string()),
            context: ErrorContext::new("fetcher")
                .with_operation("parse_repo_url")
                .with_suggestion("Only github.com repositories are supported"),
        });
    }

    let segments: Vec<&str> = parsed_url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(RepomapError::Validation {
            message: "URL must contain owner and repository name".to_string(),
            field: Some("repository_url".to_string()),
            context: ErrorContext::new("fetcher")
                .with_operation("parse_repo_url")
                .with_suggestion("Expected format: https://github.com/owner/repo"),
        });
    }

    Ok(RepoInfo {
        owner: segments[0].to_string(),
        name: segments[1].trim_end_matches(".git").to_string(),
        url: url_or_slug.to_string(),
    })
}

/// Repository fetcher driving a `RepositoryApiClient`
pub struct RepositoryFetcher {
    client: Box<dyn RepositoryApiClient>,
    config: FetchConfig,
}

impl RepositoryFetcher {
    pub fn new(client: Box<dyn RepositoryApiClient>, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Construct a fetcher against the GitHub API
    pub fn github(access_token: Option<String>, config: FetchConfig) -> RepomapResult<Self> {
        let api_config =
            ApiClientConfig::github(access_token).with_timeout(config.timeout_seconds);
        Ok(Self::new(Box::new(GitHubApiClient::new(api_config)?), config))
    }

    /// Raw content of a single file, for the inspect panel
    pub async fn file_content(&self, info: &RepoInfo, path: &str) -> RepomapResult<String> {
        self.client
            .get_file_content(&info.owner, &info.name, path)
            .await
    }

    /// Fetch metadata, dashboard records, and the depth-bounded contents
    /// mapping for one repository.
    ///
    /// Exactly one progress event is emitted per remote call; the total
    /// estimate grows as new directories are discovered.
    pub async fn fetch(
        &self,
        info: &RepoInfo,
        progress: &mut ProgressReporter,
    ) -> RepomapResult<RepoData> {
        info!(repo = %info.slug(), max_depth = self.config.max_depth, "Starting repository fetch");

        // Fixed calls: metadata, root listing, branches, contributors, readme
        progress.extend_total(5);

        // Metadata failures abandon the whole operation; everything else
        // degrades section by section.
        let metadata = self
            .client
            .get_repository_metadata(&info.owner, &info.name)
            .await?;
        progress.advance(FetchPhase::Metadata);

        let contents = self.walk_contents(info, progress).await;

        let branches = match self.client.list_branches(&info.owner, &info.name).await {
            Ok(branches) => branches,
            Err(e) => {
                warn!(repo = %info.slug(), error = %e, "Failed to list branches");
                Vec::new()
            }
        };
        progress.advance(FetchPhase::Branches);

        let contributors = match self
            .client
            .list_contributors(&info.owner, &info.name, self.config.max_contributors)
            .await
        {
            Ok(contributors) => contributors,
            Err(e) => {
                warn!(repo = %info.slug(), error = %e, "Failed to list contributors");
                Vec::new()
            }
        };
        progress.advance(FetchPhase::Contributors);

        let readme = match self.client.get_readme(&info.owner, &info.name).await {
            Ok(readme) => readme,
            Err(e) => {
                warn!(repo = %info.slug(), error = %e, "Failed to fetch README");
                None
            }
        };
        progress.advance(FetchPhase::Readme);

        progress.finish();

        info!(
            repo = %info.slug(),
            directories = contents.len(),
            entries = contents.iter().map(|(_, v)| v.len()).sum::<usize>(),
            "Repository fetch complete"
        );

        Ok(RepoData {
            info: info.clone(),
            metadata,
            branches,
            contributors,
            readme,
            contents: contents.into_iter().collect(),
        })
    }

    /// Breadth-first walk over directory listings with an explicit worklist
    /// and depth counter. Directories at depth `max_depth` and beyond are
    /// left unlisted, which the tree builder renders as childless nodes.
    async fn walk_contents(
        &self,
        info: &RepoInfo,
        progress: &mut ProgressReporter,
    ) -> Vec<(String, Vec<RepoEntry>)> {
        let mut contents = Vec::new();
        let mut frontier: Vec<(String, usize)> = vec![(String::new(), 0)];

        while !frontier.is_empty() {
            let client = self.client.as_ref();
            let level: Vec<(String, usize, RepomapResult<Vec<RepoEntry>>)> =
                stream::iter(frontier.drain(..))
                    .map(|(path, depth)| async move {
                        let result = client.list_directory(&info.owner, &info.name, &path).await;
                        (path, depth, result)
                    })
                    .buffered(self.config.max_concurrent_requests)
                    .collect()
                    .await;

            let mut next = Vec::new();
            for (path, depth, result) in level {
                progress.advance(FetchPhase::Contents);
                match result {
                    Ok(entries) => {
                        for entry in &entries {
                            if entry.kind == EntryKind::Directory
                                && depth + 1 < self.config.max_depth
                            {
                                next.push((entry.path.clone(), depth + 1));
                            }
                        }
                        contents.push((path, entries));
                    }
                    Err(e) => {
                        // Subtree absent, not fatal
                        warn!(
                            repo = %info.slug(),
                            path = %path,
                            error = %e,
                            "Failed to list directory, skipping subtree"
                        );
                    }
                }
            }

            progress.extend_total(next.len());
            frontier = next;
        }

        contents
    }
}
