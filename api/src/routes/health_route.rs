//! GET / and GET /health.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};

use crate::core::app_state::AppState;

/// Handler: GET / — service banner.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "insight-backend is running" }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub database: &'static str,
    pub completion_model: String,
    pub embedding_model: String,
}

/// Handler: GET /health — pings Postgres and reports the configured models.
///
/// Reports rather than fails: an unreachable database yields `"down"` with
/// HTTP 200 so the endpoint stays usable for dashboards.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.pipeline.ping_database().await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    let (completion, embedding) = state.pipeline.llm_profiles().profiles();

    Json(HealthResponse {
        database,
        completion_model: completion.model.clone(),
        embedding_model: embedding.model.clone(),
    })
}
