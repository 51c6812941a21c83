//! Shared state for all HTTP handlers.
//!
//! Every external client (LLM profiles, Qdrant store, Postgres pool) is
//! constructed exactly once here, at process start, and injected into the
//! pipeline. Handlers only ever see the wired [`sql_pipeline::QueryPipeline`].

use std::{error::Error, sync::Arc};

use llm_service::LlmServiceProfiles;
use schema_store::{IndexConfig, ProfileEmbedder, SchemaStore};
use sql_pipeline::{DbConfig, QueryPipeline};

/// The two example table descriptions used when `SCHEMA_DESCRIPTIONS` is not
/// set.
const DEFAULT_SCHEMAS: [&str; 2] = [
    "Table orders(id, product_id, quantity, price, date)",
    "Table products(id, name, category)",
];

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// The wired question-to-SQL pipeline.
    pub pipeline: QueryPipeline,
    /// Schema descriptions used by the index-build endpoint when the request
    /// body carries none.
    pub schema_descriptions: Vec<String>,
}

impl AppState {
    /// Loads configuration from environment variables and wires every
    /// service.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let llm = Arc::new(LlmServiceProfiles::from_env()?);

        let index_cfg = IndexConfig::from_env()?;
        let embedder = ProfileEmbedder::new(llm.clone(), index_cfg.vector_dim);
        let store = SchemaStore::new(index_cfg)?;

        let pool = DbConfig::from_env()?.create_pool()?;

        let pipeline = QueryPipeline::new(llm, store, Box::new(embedder), pool);

        Ok(Self {
            pipeline,
            schema_descriptions: schema_descriptions_from_env(),
        })
    }
}

/// Reads `SCHEMA_DESCRIPTIONS` (semicolon-separated) or falls back to the
/// two example tables.
fn schema_descriptions_from_env() -> Vec<String> {
    match std::env::var("SCHEMA_DESCRIPTIONS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => DEFAULT_SCHEMAS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schemas_cover_both_tables() {
        let list = DEFAULT_SCHEMAS;
        assert!(list[0].contains("orders"));
        assert!(list[1].contains("products"));
    }
}
