//! Runtime and collection configuration.

use crate::errors::IndexError;

/// Configuration for the schema index.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Fixed vector dimensionality; every indexed point must match it.
    pub vector_dim: usize,
    /// How many schema descriptions a retrieval returns.
    pub top_k: u64,
}

impl IndexConfig {
    /// Creates a sane default config for a given Qdrant endpoint.
    pub fn new_default(url: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: "schema_embeddings".into(),
            vector_dim: 384,
            top_k: 3,
        }
    }

    /// Loads the config from environment variables.
    ///
    /// - `QDRANT_URL`        (default `http://localhost:6334`)
    /// - `QDRANT_API_KEY`    (optional)
    /// - `SCHEMA_COLLECTION` (default `schema_embeddings`)
    /// - `EMBEDDING_DIM`     (default `384`)
    /// - `SCHEMA_TOP_K`      (default `3`)
    pub fn from_env() -> Result<Self, IndexError> {
        let mut cfg = Self::new_default(
            std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".into()),
        );
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        if let Ok(c) = std::env::var("SCHEMA_COLLECTION") {
            if !c.trim().is_empty() {
                cfg.collection = c;
            }
        }
        if let Ok(d) = std::env::var("EMBEDDING_DIM") {
            cfg.vector_dim = d
                .parse()
                .map_err(|_| IndexError::Config("EMBEDDING_DIM must be a positive integer".into()))?;
        }
        if let Ok(k) = std::env::var("SCHEMA_TOP_K") {
            cfg.top_k = k
                .parse()
                .map_err(|_| IndexError::Config("SCHEMA_TOP_K must be a positive integer".into()))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(IndexError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(IndexError::Config("collection is empty".into()));
        }
        if self.vector_dim == 0 {
            return Err(IndexError::Config("vector_dim must be > 0".into()));
        }
        if self.top_k == 0 {
            return Err(IndexError::Config("top_k must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_encoder() {
        let cfg = IndexConfig::new_default("http://localhost:6334");
        assert_eq!(cfg.vector_dim, 384);
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.collection, "schema_embeddings");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_top_k() {
        let mut cfg = IndexConfig::new_default("http://localhost:6334");
        cfg.top_k = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_collection() {
        let mut cfg = IndexConfig::new_default("http://localhost:6334");
        cfg.collection = " ".into();
        assert!(cfg.validate().is_err());
    }
}
