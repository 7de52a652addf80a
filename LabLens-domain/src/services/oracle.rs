use async_trait::async_trait;
use thiserror::Error;

/// Errors from the text-completion oracle boundary
#[derive(Debug, Error)]
pub enum OracleError {
    /// The server-held API key is not configured. Raised before any network
    /// I/O is attempted.
    #[error("Missing Gemini API key")]
    MissingApiKey,

    /// The oracle answered with a non-success status. Carries the raw
    /// response body text.
    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// The request never produced an HTTP response (DNS, connect, TLS, or
    /// body-read failure).
    #[error("Gemini API request failed: {0}")]
    Transport(String),

    /// The oracle answered 2xx but with no usable candidate text.
    #[error("Gemini API returned no analysis text")]
    EmptyCompletion,
}

/// One completion request: the instruction text plus the inlined image.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Full prompt text (see `services::prompt`)
    pub prompt: String,

    /// Base64-encoded image bytes, forwarded as-is
    pub image_base64: String,

    /// MIME type of the image
    pub image_mime: String,
}

/// An external text-completion service treated as an opaque black box.
///
/// One suspending call per request: no retry, no client-side timeout beyond
/// whatever the transport applies by default, no cancellation.
#[async_trait]
pub trait AnalysisOracle: Send + Sync {
    /// Submit the prompt and image, returning the oracle's raw text answer.
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError>;
}
