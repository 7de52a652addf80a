//! Reqwest-backed [`AnalysisOracle`] hitting the Gemini generateContent
//! endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::services::oracle::{AnalysisOracle, OracleError, OracleRequest};

/// Environment variable holding the server-side API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generative-language API.
///
/// The key is resolved when the client is constructed; a missing key is not
/// an error until a completion is actually requested, mirroring the
/// per-request configuration check at the original boundary.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// An absent or empty variable still yields a client; it fails with
    /// [`OracleError::MissingApiKey`] on first use.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            debug!("{} is not set; completions will fail until configured", API_KEY_ENV);
        }
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests to target a local
    /// stand-in for the real endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL, api_key
        )
    }
}

#[async_trait]
impl AnalysisOracle for GeminiClient {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let api_key = self.api_key.as_deref().ok_or(OracleError::MissingApiKey)?;

        let payload = GenerateContentPayload {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: request.prompt.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.image_mime.clone(),
                            data: request.image_base64.clone(),
                        },
                    },
                ],
            }],
        };

        info!("Sending request to Gemini API");
        let response = self
            .http
            .post(self.endpoint(api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable error body: {}>", e));
            error!("Gemini API error response: {}", body);
            return Err(OracleError::Upstream(body));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        info!("Gemini API response received");

        // Only the first candidate's first text part is consumed.
        result
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(OracleError::EmptyCompletion)
    }
}

// Wire types for the generateContent request/response. Only the fields this
// client reads are modeled.

#[derive(Debug, Serialize)]
struct GenerateContentPayload {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
