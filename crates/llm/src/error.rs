use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors raised by the generation backends
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Malformed stream event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("Stream read failed: {0}")]
    StreamIo(#[from] std::io::Error),

    #[error("Unknown generation backend: {0}")]
    UnknownBackend(String),

    #[error("Stub backend requires {0} to point at a response directory")]
    MissingScriptDir(&'static str),

    #[error("Scripted generator exhausted after {0} response(s)")]
    ScriptExhausted(usize),
}
