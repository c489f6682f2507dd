use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the rewrite pipelines
#[derive(Debug, Error)]
pub enum EngineError {
    /// Selection produced no usable chunk ids. Proceeding would silently
    /// rewrite nothing, so this is fatal.
    #[error("No relevant chunks found for modification")]
    NoRelevantChunks,

    /// The plan response carried no `<plan>` block
    #[error("Model response did not contain a <plan> block")]
    MissingPlan,

    #[error("Chunking failed: {0}")]
    Chunker(#[from] recast_chunker::ChunkerError),

    #[error("Generation failed: {0}")]
    Llm(#[from] recast_llm::LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
