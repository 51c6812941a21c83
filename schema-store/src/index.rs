//! Offline index build: recreate the collection and upsert one point per
//! schema description.

use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::IndexConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::IndexError;
use crate::qdrant_facade::QdrantFacade;

/// Payload key carrying the schema description text.
pub(crate) const SCHEMA_PAYLOAD_KEY: &str = "schema";

/// Rebuilds the collection from `descriptions`.
///
/// Destructive on purpose: the collection is dropped and recreated with the
/// configured dimensionality, then every description is embedded and upserted
/// under a fresh v4 UUID. Not an incremental upsert.
///
/// # Errors
/// Embedding failures, a dimensionality mismatch, or Qdrant being
/// unreachable. A mismatch aborts before anything is written.
pub async fn build(
    cfg: &IndexConfig,
    client: &QdrantFacade,
    descriptions: &[String],
    provider: &dyn EmbeddingsProvider,
) -> Result<usize, IndexError> {
    info!(
        "Building schema index '{}' from {} descriptions",
        cfg.collection,
        descriptions.len()
    );

    // Encode everything first so a bad vector aborts before the collection
    // is dropped.
    let mut points = Vec::with_capacity(descriptions.len());
    for text in descriptions {
        let vector = provider.embed(text).await?;
        if vector.len() != cfg.vector_dim {
            return Err(IndexError::VectorSizeMismatch {
                got: vector.len(),
                want: cfg.vector_dim,
            });
        }

        let mut payload = Payload::new();
        payload.insert(SCHEMA_PAYLOAD_KEY, text.clone());

        let id = Uuid::new_v4().to_string();
        debug!("Indexed point id={id} text={text:?}");
        points.push(PointStruct::new(id, vector, payload));
    }

    client.recreate_collection(cfg.vector_dim).await?;
    let count = points.len();
    client.upsert_points(points).await?;

    info!("Schema index '{}' built: {} points", cfg.collection, count);
    Ok(count)
}
