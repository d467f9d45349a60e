//! Generative analysis client
//!
//! A single pass-through call to an OpenAI-compatible chat completions
//! endpoint. One request, no retry, no streaming, no session state; any
//! failure along the way is reported so the caller can fall back to the
//! scripted conversation.

use crate::conversation::{extract_conversation, scripted_conversation, ConversationTurn};
use repomap_core::{
    AnalysisConfig, CredentialsConfig, ErrorContext, RepomapError, RepomapResult,
};
use repomap_graph::RepoStats;
use repomap_repo::RepoData;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT_SECONDS: u64 = 60;

const SYSTEM_PROMPT: &str = "You are generating a short analysis dialogue \
between three agents named Scout, Architect and Analyst who just examined a \
code repository. Respond with a JSON array of objects with \"agent\" and \
\"content\" string fields, and nothing else. Keep it to at most eight turns.";

fn analysis_error(message: impl Into<String>) -> RepomapError {
    RepomapError::Analysis {
        message: message.into(),
        source: None,
        context: ErrorContext::new("analysis"),
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for one OpenAI-compatible completions endpoint
pub struct AnalysisClient {
    http: reqwest::Client,
    config: AnalysisConfig,
    base_url: String,
    api_key: String,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig, api_key: String) -> RepomapResult<Self> {
        let base_url = match config.base_url.as_deref() {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => match config.provider.as_str() {
                "openai" => OPENAI_BASE_URL.to_string(),
                "groq" => GROQ_BASE_URL.to_string(),
                other => {
                    return Err(RepomapError::Validation {
                        message: format!("unknown analysis provider: {}", other),
                        field: Some("provider".to_string()),
                        context: ErrorContext::new("analysis")
                            .with_suggestion("Use 'openai' or 'groq', or set base_url"),
                    });
                }
            },
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| analysis_error(format!("failed to create HTTP client: {}", e)))?;

        info!(
            provider = %config.provider,
            model = %config.model,
            "created analysis client"
        );

        Ok(Self {
            http,
            config,
            base_url,
            api_key,
        })
    }

    /// One chat completion request; the response text is scanned for an
    /// embedded conversation array
    pub async fn generate_conversation(
        &self,
        data: &RepoData,
        stats: &RepoStats,
    ) -> RepomapResult<Vec<ConversationTurn>> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(data, stats),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "sending analysis request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| analysis_error(format!("analysis request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(analysis_error(format!(
                "analysis endpoint returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| analysis_error(format!("malformed analysis response: {}", e)))?;

        let text = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("");

        extract_conversation(text).ok_or_else(|| {
            analysis_error("response did not contain a conversation array")
        })
    }
}

/// Repository summary handed to the endpoint as the user message
fn build_prompt(data: &RepoData, stats: &RepoStats) -> String {
    let top_types = stats
        .top_file_types(5)
        .into_iter()
        .map(|(ext, count)| {
            if ext.is_empty() {
                format!("(none) x{}", count)
            } else {
                format!(".{} x{}", ext, count)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Repository: {}\nDescription: {}\nLanguage: {}\nStars: {} Forks: {} Open issues: {}\n\
         Directories: {} Files: {} Max depth: {}\nTop file types: {}\nContributors fetched: {}",
        data.info.slug(),
        data.metadata.description.as_deref().unwrap_or("(none)"),
        data.metadata.language.as_deref().unwrap_or("(unknown)"),
        data.metadata.stars,
        data.metadata.forks,
        data.metadata.open_issues,
        stats.total_directories,
        stats.total_files,
        stats.max_depth,
        top_types,
        data.contributors.len(),
    )
}

/// Pick the provider from the configured credentials or environment.
///
/// Preference order matches the config loader: an explicit key in the
/// credentials, then `OPENAI_API_KEY`, then `GROQ_API_KEY`. Returns `None`
/// when no key is available, which callers treat as "scripted only".
pub fn detect_client(
    config: &AnalysisConfig,
    credentials: &CredentialsConfig,
) -> Option<RepomapResult<AnalysisClient>> {
    if let Some(key) = credentials.ai_api_key.clone() {
        return Some(AnalysisClient::new(config.clone(), key));
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        let mut config = config.clone();
        config.provider = "openai".to_string();
        return Some(AnalysisClient::new(config, key));
    }
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        let mut config = config.clone();
        config.provider = "groq".to_string();
        return Some(AnalysisClient::new(config, key));
    }
    None
}

/// Produce the analysis conversation, preferring the generative endpoint
/// when a key is configured and silently falling back to the scripted
/// exchange on any failure
pub async fn analyze(
    data: &RepoData,
    stats: &RepoStats,
    config: &AnalysisConfig,
    credentials: &CredentialsConfig,
) -> Vec<ConversationTurn> {
    match detect_client(config, credentials) {
        Some(Ok(client)) => match client.generate_conversation(data, stats).await {
            Ok(turns) => {
                info!(turns = turns.len(), "generative analysis succeeded");
                turns
            }
            Err(e) => {
                warn!("generative analysis failed, using scripted conversation: {}", e);
                scripted_conversation(data, stats)
            }
        },
        Some(Err(e)) => {
            warn!("analysis client unavailable, using scripted conversation: {}", e);
            scripted_conversation(data, stats)
        }
        None => {
            debug!("no analysis credentials, using scripted conversation");
            scripted_conversation(data, stats)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomap_core::AnalysisConfig;

    #[test]
    fn known_providers_resolve_base_urls() {
        let openai = AnalysisClient::new(AnalysisConfig::default(), "key".to_string()).unwrap();
        assert_eq!(openai.base_url, OPENAI_BASE_URL);

        let groq = AnalysisClient::new(
            AnalysisConfig {
                provider: "groq".to_string(),
                ..AnalysisConfig::default()
            },
            "key".to_string(),
        )
        .unwrap();
        assert_eq!(groq.base_url, GROQ_BASE_URL);
    }

    #[test]
    fn explicit_base_url_overrides_provider() {
        let client = AnalysisClient::new(
            AnalysisConfig {
                base_url: Some("http://localhost:11434/v1/".to_string()),
                ..AnalysisConfig::default()
            },
            "key".to_string(),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn unknown_provider_without_base_url_is_rejected() {
        let result = AnalysisClient::new(
            AnalysisConfig {
                provider: "mystery".to_string(),
                ..AnalysisConfig::default()
            },
            "key".to_string(),
        );
        assert!(result.is_err());
    }
}
