pub mod gemini;
pub mod mock;
pub mod openrouter;
pub mod parser;

pub use gemini::*;
pub use mock::*;
pub use openrouter::*;
pub use parser::*;

use thiserror::Error;

/// Failure of a single remote model call. Every variant is recoverable
/// by the calling stage's fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Cannot reach model endpoint at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("No compatible model available")]
    NoModelAvailable,
}

impl LlmError {
    /// Quota or rate-limit rejection (HTTP 429 / RESOURCE_EXHAUSTED).
    pub fn is_rate_limited(&self) -> bool {
        if let Self::Api { status: 429, .. } = self {
            return true;
        }
        let text = self.to_string();
        text.contains("429") || text.contains("RESOURCE_EXHAUSTED")
    }
}

/// Single-prompt text generation.
pub trait TextModel: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// Image + instruction prompt → free text.
pub trait VisionModel: Send + Sync {
    fn describe_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, LlmError> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::HttpClient(e.to_string()))
}

pub(crate) fn map_send_error(e: reqwest::Error, base_url: &str, timeout_secs: u64) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(timeout_secs)
    } else if e.is_connect() {
        LlmError::Connection(base_url.to_string())
    } else {
        LlmError::HttpClient(e.to_string())
    }
}

pub(crate) fn ensure_success(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        body,
    })
}
