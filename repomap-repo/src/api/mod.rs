//! API clients for accessing remote repositories
//!
//! This module provides the client abstraction for reading repository
//! structure and metadata over a hosting platform's REST API, without
//! cloning.

use async_trait::async_trait;
use repomap_core::{ErrorContext, RepomapError, RepomapResult};
use serde::{Deserialize, Serialize};

pub mod github;

#[cfg(test)]
mod tests;

pub use github::GitHubApiClient;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry in a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Path relative to repository root
    pub path: String,
    /// Final path segment
    pub name: String,
    pub kind: EntryKind,
    /// File size in bytes (directories report none)
    pub size: Option<u64>,
}

/// Repository metadata for the dashboard surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Repository size in KB
    pub size: Option<u64>,
    pub private: bool,
}

/// One contributor record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
}

/// One branch record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub protected: bool,
}

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_seconds: 30,
            user_agent: "repomap/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for GitHub
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Trait for repository API clients
#[async_trait]
pub trait RepositoryApiClient: Send + Sync {
    /// Get repository metadata
    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> RepomapResult<RepositoryMetadata>;

    /// List the entries of a single directory (`""` for the root)
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> RepomapResult<Vec<RepoEntry>>;

    /// List branches
    async fn list_branches(&self, owner: &str, repo: &str) -> RepomapResult<Vec<Branch>>;

    /// List contributors, most active first
    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> RepomapResult<Vec<Contributor>>;

    /// Get README content (if available)
    async fn get_readme(&self, owner: &str, repo: &str) -> RepomapResult<Option<String>>;

    /// Get the raw content of a specific file
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> RepomapResult<String>;
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> RepomapResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            RepomapError::Repository {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| RepomapError::Repository {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Map an unsuccessful HTTP response onto the error taxonomy.
///
/// A 403 with an exhausted quota header is a rate limit, not a permission
/// problem; a 404 covers both missing and private repositories.
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    context: &str,
) -> RepomapError {
    let status = response.status();
    let url = response.url().clone();

    let rate_limited = status.as_u16() == 403
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);

    let retry_after_ms = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(|secs| secs * 1000);

    if rate_limited {
        return RepomapError::RateLimit {
            message: format!("GitHub API quota exhausted for {}", url),
            retry_after_ms,
            context: ErrorContext::new("api_client")
                .with_operation(context)
                .with_suggestion("Add a GitHub token to raise the rate limit")
                .with_suggestion("Wait for the quota window to reset"),
        };
    }

    if status.as_u16() == 404 {
        return RepomapError::NotFound {
            resource: url.to_string(),
            context: ErrorContext::new("api_client")
                .with_operation(context)
                .with_suggestion("Repository not found or not accessible")
                .with_suggestion("Private repositories require an access token"),
        };
    }

    let error_body = response.text().await.unwrap_or_default();

    RepomapError::Repository {
        message: format!(
            "HTTP {} error for {}: {}",
            status.as_u16(),
            url,
            if error_body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error")
            } else {
                &error_body
            }
        ),
        source: None,
        context: ErrorContext::new("api_client")
            .with_operation(context)
            .with_suggestion(match status.as_u16() {
                401 => "Check your access token",
                403 => "Check repository permissions",
                _ => "Check network connectivity and API status",
            }),
    }
}
