//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! Concentrates all Qdrant interactions behind a minimal API, hiding the
//! verbose builder pattern and keeping the rest of the crate decoupled from
//! `qdrant-client`.

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, Value as QValue,
    VectorParamsBuilder,
};
use tracing::{debug, info, warn};

use crate::config::IndexConfig;
use crate::errors::IndexError;

/// A facade over the Qdrant client to keep the rest of the code clean.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports optional
    /// API key authentication.
    pub fn new(cfg: &IndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| IndexError::Config(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    /// Drops and recreates the collection with cosine distance.
    ///
    /// A missing collection on delete is not an error; the recreate is
    /// destructive by design.
    pub async fn recreate_collection(&self, dim: usize) -> Result<(), IndexError> {
        info!(
            "Recreating collection '{}' with size={} distance=Cosine",
            self.collection, dim
        );

        if let Err(err) = self.client.delete_collection(&self.collection).await {
            warn!(
                "Collection '{}' could not be deleted (may not exist yet): {}",
                self.collection, err
            );
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, Distance::Cosine)),
            )
            .await
            .map_err(|e| IndexError::Unavailable(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Upserts a batch of points into the collection.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<(), IndexError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(());
        }

        info!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        self.client
            .upsert_points(qdrant_client::qdrant::UpsertPointsBuilder::new(
                &self.collection,
                points,
            ))
            .await
            .map_err(|e| IndexError::Unavailable(e.to_string()))?;

        Ok(())
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples sorted by score, best first.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, IndexError> {
        debug!(
            "Searching in '{}' with top_k={}",
            self.collection, top_k
        );

        let res = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true),
            )
            .await
            .map_err(|e| IndexError::Unavailable(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Nested objects/arrays never occur in schema payloads and map to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use std::collections::HashMap;

    fn qstring(s: &str) -> QValue {
        QValue {
            kind: Some(Kind::StringValue(s.to_string())),
        }
    }

    #[test]
    fn payload_conversion_keeps_scalars() {
        let mut p = HashMap::new();
        p.insert(
            "schema".to_string(),
            qstring("Table products(id, name, category)"),
        );
        p.insert(
            "rank".to_string(),
            QValue {
                kind: Some(Kind::IntegerValue(2)),
            },
        );

        let json = qpayload_to_json(p);
        assert_eq!(
            json["schema"].as_str().unwrap(),
            "Table products(id, name, category)"
        );
        assert_eq!(json["rank"].as_i64().unwrap(), 2);
    }

    #[test]
    fn payload_conversion_nulls_unknown_kinds() {
        let mut p = HashMap::new();
        p.insert("gone".to_string(), QValue { kind: None });
        let json = qpayload_to_json(p);
        assert!(json["gone"].is_null());
    }
}
