//! Tests for API clients

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_api_client_config_creation() {
        let github_config = ApiClientConfig::github(Some("test_token".to_string()));
        assert_eq!(github_config.base_url, "https://api.github.com");
        assert_eq!(github_config.access_token, Some("test_token".to_string()));

        let anonymous = ApiClientConfig::github(None);
        assert!(anonymous.access_token.is_none());
        assert_eq!(anonymous.timeout_seconds, 30);
    }

    #[test]
    fn test_config_with_timeout() {
        let config = ApiClientConfig::github(None).with_timeout(60);
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_repo_entry_kinds() {
        let entry = RepoEntry {
            path: "src/main.rs".to_string(),
            name: "main.rs".to_string(),
            kind: EntryKind::File,
            size: Some(1024),
        };

        assert_eq!(entry.kind, EntryKind::File);
        assert_ne!(entry.kind, EntryKind::Directory);
        assert_eq!(entry.size, Some(1024));
    }

    #[test]
    fn test_repository_metadata_creation() {
        let metadata = RepositoryMetadata {
            name: "test-repo".to_string(),
            description: Some("A test repository".to_string()),
            default_branch: "main".to_string(),
            language: Some("Rust".to_string()),
            topics: vec!["rust".to_string(), "test".to_string()],
            stars: 120,
            forks: 14,
            open_issues: 3,
            size: Some(2048),
            private: false,
        };

        assert_eq!(metadata.name, "test-repo");
        assert_eq!(metadata.stars, 120);
        assert_eq!(metadata.topics.len(), 2);
        assert!(!metadata.private);
    }

    #[tokio::test]
    async fn test_http_client_creation() {
        let config = ApiClientConfig::github(None);
        let client = create_http_client(&config);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_github_client_creation() {
        let config = ApiClientConfig::github(None);
        let client = GitHubApiClient::new(config);
        assert!(client.is_ok());
    }
}
