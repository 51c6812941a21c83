//! Unified error type for the pipeline.
//!
//! Gatekeeper rejections are deliberately *not* here: a rejected statement is
//! an expected, user-visible outcome and travels as data
//! ([`crate::AskOutcome::Rejected`]), never as an error.

use thiserror::Error;

/// Top-level error for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid database configuration value (startup time).
    #[error("database configuration error: {0}")]
    Config(String),

    /// Schema index unreachable or empty.
    #[error(transparent)]
    Index(#[from] schema_store::IndexError),

    /// Model endpoint failure (transport, bad status, no choices).
    #[error(transparent)]
    Llm(#[from] llm_service::LlmError),

    /// The model produced nothing usable after fence stripping.
    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// Connection pool failure (checkout timeout, pool closed).
    #[error("database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Pool could not be created from the config.
    #[error("database pool creation failed: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    /// The authorized statement failed at the database; the engine message is
    /// surfaced to aid debugging of generated SQL.
    #[error("database execution failed: {0}")]
    Database(#[from] tokio_postgres::Error),
}
