use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while chunking source files
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Empty content
    #[error("Empty content provided")]
    EmptyContent,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chunk id that does not carry a numeric sequence component
    #[error("Malformed chunk id: {0}")]
    MalformedChunkId(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a malformed chunk id error
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedChunkId(id.into())
    }
}
