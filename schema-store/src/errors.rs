//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for schema-store operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Mismatch between an encoded vector and the configured dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// The index is unreachable (wrapped Qdrant client error).
    #[error("schema index unavailable: {0}")]
    Unavailable(String),

    /// The index returned no points for a retrieval.
    #[error("schema index '{collection}' returned no results")]
    Empty { collection: String },

    /// Embedding provider failure.
    #[error("embedding failed: {0}")]
    Embedding(#[from] llm_service::LlmError),
}
