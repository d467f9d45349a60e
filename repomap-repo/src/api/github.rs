//! GitHub API client implementation

use async_trait::async_trait;
use log::{debug, info};
use repomap_core::{ErrorContext, RepomapError, RepomapResult};
use serde::Deserialize;

use super::{
    create_http_client, handle_response_error, ApiClientConfig, Branch, Contributor, EntryKind,
    RepoEntry, RepositoryApiClient, RepositoryMetadata,
};

/// GitHub API client
pub struct GitHubApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// GitHub repository response
#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
    description: Option<String>,
    default_branch: String,
    language: Option<String>,
    topics: Option<Vec<String>>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    size: Option<u64>,
    private: bool,
}

/// GitHub contents entry
#[derive(Debug, Deserialize)]
struct GitHubContentsItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GitHubContributor {
    login: Option<String>,
    contributions: u64,
}

#[derive(Debug, Deserialize)]
struct GitHubBranch {
    name: String,
    protected: Option<bool>,
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(config: ApiClientConfig) -> RepomapResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created GitHub API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Create authorization headers
    fn create_auth_headers(&self, accept: &'static str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.access_token {
            if let Ok(auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("token {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(accept),
        );

        headers
    }

    /// Make a GET request to GitHub API
    async fn get_request(
        &self,
        endpoint: &str,
        accept: &'static str,
    ) -> RepomapResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!("Making GitHub API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.create_auth_headers(accept))
            .send()
            .await
            .map_err(|e| RepomapError::Network {
                message: format!("Failed to make request to GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_request"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "github_api_request").await);
        }

        Ok(response)
    }
}

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";

#[async_trait]
impl RepositoryApiClient for GitHubApiClient {
    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> RepomapResult<RepositoryMetadata> {
        info!("Fetching GitHub repository metadata for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}", owner, repo);
        let response = self.get_request(&endpoint, ACCEPT_JSON).await?;

        let github_repo: GitHubRepository =
            response.json().await.map_err(|e| RepomapError::Repository {
                message: format!("Failed to parse repository metadata: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation("get_repository_metadata"),
            })?;

        Ok(RepositoryMetadata {
            name: github_repo.name,
            description: github_repo.description,
            default_branch: github_repo.default_branch,
            language: github_repo.language,
            topics: github_repo.topics.unwrap_or_default(),
            stars: github_repo.stargazers_count,
            forks: github_repo.forks_count,
            open_issues: github_repo.open_issues_count,
            size: github_repo.size,
            private: github_repo.private,
        })
    }

    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> RepomapResult<Vec<RepoEntry>> {
        debug!(
            "Fetching GitHub directory listing for {}/{} at '{}'",
            owner, repo, path
        );

        let endpoint = if path.is_empty() {
            format!("repos/{}/{}/contents", owner, repo)
        } else {
            format!("repos/{}/{}/contents/{}", owner, repo, path)
        };
        let response = self.get_request(&endpoint, ACCEPT_JSON).await?;

        let items: Vec<GitHubContentsItem> =
            response.json().await.map_err(|e| RepomapError::Repository {
                message: format!("Failed to parse directory listing: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("list_directory"),
            })?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let kind = match item.item_type.as_str() {
                    "dir" => EntryKind::Directory,
                    "file" => EntryKind::File,
                    // Symlinks and submodules are not part of the tree view
                    _ => return None,
                };
                Some(RepoEntry {
                    path: item.path,
                    name: item.name,
                    kind,
                    size: item.size.filter(|_| kind == EntryKind::File),
                })
            })
            .collect())
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> RepomapResult<Vec<Branch>> {
        debug!("Fetching GitHub branches for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}/branches?per_page=100", owner, repo);
        let response = self.get_request(&endpoint, ACCEPT_JSON).await?;

        let branches: Vec<GitHubBranch> =
            response.json().await.map_err(|e| RepomapError::Repository {
                message: format!("Failed to parse branches: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("list_branches"),
            })?;

        Ok(branches
            .into_iter()
            .map(|b| Branch {
                name: b.name,
                protected: b.protected.unwrap_or(false),
            })
            .collect())
    }

    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> RepomapResult<Vec<Contributor>> {
        debug!("Fetching GitHub contributors for {}/{}", owner, repo);

        let endpoint = format!(
            "repos/{}/{}/contributors?per_page={}",
            owner,
            repo,
            limit.min(100)
        );
        let response = self.get_request(&endpoint, ACCEPT_JSON).await?;

        let contributors: Vec<GitHubContributor> =
            response.json().await.map_err(|e| RepomapError::Repository {
                message: format!("Failed to parse contributors: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation("list_contributors"),
            })?;

        Ok(contributors
            .into_iter()
            .filter_map(|c| {
                c.login.map(|login| Contributor {
                    login,
                    contributions: c.contributions,
                })
            })
            .take(limit)
            .collect())
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> RepomapResult<Option<String>> {
        debug!("Fetching GitHub README for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}/readme", owner, repo);

        // README not found is not an error
        let response = match self.get_request(&endpoint, ACCEPT_RAW).await {
            Ok(response) => response,
            Err(RepomapError::NotFound { .. }) => {
                debug!("README not found for {}/{}", owner, repo);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let content = response.text().await.map_err(|e| RepomapError::Repository {
            message: format!("Failed to read README response: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client").with_operation("get_readme"),
        })?;

        Ok(Some(content))
    }

    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> RepomapResult<String> {
        debug!(
            "Fetching GitHub file content for {}/{}/{}",
            owner, repo, path
        );

        let endpoint = format!("repos/{}/{}/contents/{}", owner, repo, path);
        let response = self.get_request(&endpoint, ACCEPT_RAW).await?;

        response.text().await.map_err(|e| RepomapError::Repository {
            message: format!("Failed to read file content for {}: {}", path, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client").with_operation("get_file_content"),
        })
    }
}
