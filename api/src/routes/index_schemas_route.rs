//! POST /index_schemas — destructive schema-index rebuild.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::app_state::AppState;

/// Optional request body; when `descriptions` is absent or empty, the
/// configured defaults are indexed.
#[derive(Deserialize, Default)]
pub struct IndexSchemasRequest {
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Serialize)]
pub struct IndexSchemasResponse {
    pub indexed: usize,
}

/// Handler: POST /index_schemas
///
/// Recreates the collection from scratch and indexes one point per
/// description. This is the offline preparation step; it is not part of the
/// per-question request path.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/index_schemas \
///   -H 'content-type: application/json' -d '{}'
/// ```
pub async fn index_schemas(
    State(state): State<Arc<AppState>>,
    body: Option<Json<IndexSchemasRequest>>,
) -> Result<Json<IndexSchemasResponse>, (StatusCode, String)> {
    let Json(req) = body.unwrap_or_default();
    let descriptions = if req.descriptions.is_empty() {
        &state.schema_descriptions
    } else {
        &req.descriptions
    };

    let indexed = state
        .pipeline
        .rebuild_index(descriptions)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Json(IndexSchemasResponse { indexed }))
}
