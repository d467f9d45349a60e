//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Repository coordinates parsed from a user-supplied URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    pub url: String,
}

impl RepoInfo {
    /// `owner/name` slug used in log lines and default output names
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Top-level configuration, constructed once at startup and passed explicitly
/// into every component that needs it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepomapConfig {
    pub credentials: CredentialsConfig,
    pub fetch: FetchConfig,
    pub layout: LayoutConfig,
    pub analysis: AnalysisConfig,
}

/// API credentials, sourced from the config file or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// GitHub API token for authenticated requests (higher rate limits)
    pub github_token: Option<String>,
    /// API key for the generative analysis endpoint
    pub ai_api_key: Option<String>,
}

/// Repository fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum directory depth to traverse (root entries are depth 1)
    pub max_depth: usize,
    /// Maximum in-flight directory listings
    pub max_concurrent_requests: usize,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum contributors to fetch for the dashboard
    pub max_contributors: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_concurrent_requests: 4,
            timeout_seconds: 30,
            max_contributors: 30,
        }
    }
}

/// Force layout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Many-body repulsion strength (negative repels)
    pub charge_strength: f32,
    /// Padding added to node radii for collision avoidance
    pub collision_padding: f32,
    /// Extra spring distance added per depth level
    pub link_distance_step: f32,
    /// Use the radial variant (concentric ring per depth level)
    pub radial: bool,
    /// Ring spacing for the radial variant
    pub radial_ring_step: f32,
    /// Upper bound on simulation ticks
    pub max_ticks: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            charge_strength: -120.0,
            collision_padding: 2.0,
            link_distance_step: 20.0,
            radial: false,
            radial_ring_step: 90.0,
            max_ticks: 300,
        }
    }
}

/// Generative analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Provider type (openai, groq, or any OpenAI-compatible endpoint)
    pub provider: String,
    /// Model name
    pub model: String,
    /// Base URL for custom providers
    pub base_url: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}
