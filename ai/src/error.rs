//! AI Error Types
//!
//! [`AiError`] covers every failure of the essay analysis call: configuration problems (missing
//! API key or prompt file), transport errors, and answers the service returned but that carry no
//! usable text.

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("Prompt file not found: {0}")]
    PromptNotFound(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    /// The service answered with a non-success status.
    #[error("AI service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Unexpected AI response: {0}")]
    InvalidResponse(String),
    #[error("AI response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for AiError {
    /// The request URL is stripped so nothing about the endpoint leaks into messages.
    fn from(e: reqwest::Error) -> Self {
        AiError::Http(e.without_url().to_string())
    }
}
