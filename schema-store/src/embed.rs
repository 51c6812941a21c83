//! Embedding provider seam.
//!
//! Async is required because real providers perform HTTP requests; the trait
//! uses a boxed future so it stays object-safe.

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::LlmServiceProfiles;
use tracing::warn;

use crate::errors::IndexError;

/// Provider interface for embedding generation.
///
/// Implement this to plug in an embedding backend; the store itself never
/// talks to a model endpoint directly.
pub trait EmbeddingsProvider: Send + Sync {
    /// Encodes `text` into a fixed-length vector.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>>;
}

/// Embedding provider backed by the shared LLM profiles.
///
/// Checks the returned dimensionality against the configured one, so a
/// mismatched encoder fails at index-build time rather than at query time.
#[derive(Clone)]
pub struct ProfileEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl ProfileEmbedder {
    /// Constructs a new embedder over the shared profiles.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for ProfileEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>> {
        Box::pin(async move {
            let vector = self.svc.embed(text).await?;

            if vector.len() != self.dim {
                warn!(got = vector.len(), want = self.dim, "embedding dimension mismatch");
                return Err(IndexError::VectorSizeMismatch {
                    got: vector.len(),
                    want: self.dim,
                });
            }

            Ok(vector)
        })
    }
}
