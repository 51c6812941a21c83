//! Schema index over Qdrant: batch build + top-k retrieval.
//!
//! This crate owns the "schema retrieval" half of the question-answering
//! pipeline:
//! - [`SchemaStore::build_index`] recreates the collection from scratch and
//!   upserts one point per schema description (offline preparation step).
//! - [`SchemaStore::retrieve`] embeds a question and returns the top-k schema
//!   descriptions joined with newlines, in the ranked order Qdrant returns.
//!
//! Embeddings come through the [`EmbeddingsProvider`] seam so the store never
//! depends on a concrete LLM client.

mod config;
mod embed;
mod errors;
mod index;
mod qdrant_facade;
mod retrieve;

pub use config::IndexConfig;
pub use embed::{EmbeddingsProvider, ProfileEmbedder};
pub use errors::IndexError;

use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct SchemaStore {
    cfg: IndexConfig,
    client: qdrant_facade::QdrantFacade,
}

impl SchemaStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns [`IndexError::Config`] on invalid configuration or client
    /// initialization failure.
    pub fn new(cfg: IndexConfig) -> Result<Self, IndexError> {
        trace!("SchemaStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Rebuilds the schema index from the given descriptions.
    ///
    /// Destructive: the collection is dropped and recreated, then one point
    /// per description is upserted with a fresh v4 UUID. Returns the number
    /// of indexed descriptions.
    ///
    /// # Errors
    /// Fails fast on a vector dimensionality mismatch, and propagates
    /// embedding or Qdrant failures.
    pub async fn build_index(
        &self,
        descriptions: &[String],
        provider: &dyn EmbeddingsProvider,
    ) -> Result<usize, IndexError> {
        index::build(&self.cfg, &self.client, descriptions, provider).await
    }

    /// Retrieves the schema text most relevant to `question`.
    ///
    /// Returns the top-k payloads joined with `\n`, preserving the
    /// similarity-ranked order returned by the index.
    ///
    /// # Errors
    /// Returns [`IndexError::Empty`] when the index holds no matching points
    /// and [`IndexError::Unavailable`] when Qdrant cannot be reached; callers
    /// must not substitute a default schema silently.
    pub async fn retrieve(
        &self,
        question: &str,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<String, IndexError> {
        retrieve::retrieve(&self.cfg, &self.client, question, provider).await
    }
}
