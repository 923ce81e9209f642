//! REST client for the Gemini `generateContent` endpoint.
//!
//! [`GeminiClient`] is the production implementation of the
//! [`TextGenerator`] trait; tests substitute stub generators through the
//! same seam.

use async_trait::async_trait;
use serde::Deserialize;

/// Default public API base.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Errors from the generation client.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API replied 2xx but produced no text candidates.
    #[error("Generation API returned an empty reply")]
    EmptyReply,
}

/// The seam between request handling and the external model.
///
/// One call per prompt; no retry, no local timeout beyond the HTTP
/// client's defaults. A failure is a single error for the caller to map.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free-form text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}

/// Configuration for [`GeminiClient`], loaded from the environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash-lite`.
    pub model: String,
    /// API base URL without a trailing slash.
    pub api_base: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                       |
    /// |-------------------|----------|-------------------------------|
    /// | `GEMINI_API_KEY`  | **yes**  | --                            |
    /// | `GEMINI_MODEL`    | no       | `gemini-2.5-flash-lite`       |
    /// | `GEMINI_API_BASE` | no       | public `generativelanguage` v1beta |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "GEMINI_API_KEY must not be empty");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let api_base = std::env::var("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Self {
            api_key,
            model,
            api_base,
        }
    }
}

/// HTTP client for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with its own connection pool.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Full `generateContent` endpoint URL for the configured model.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;

        let text: String = reply
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenAiError::EmptyReply);
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Wire types for the generateContent reply
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
