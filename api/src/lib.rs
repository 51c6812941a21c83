//! HTTP layer: thin axum handlers over the question-to-SQL pipeline.

use std::{env, error::Error, sync::Arc};

mod core;
mod routes;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{
    ask_question_route::ask_question,
    health_route::{health, root},
    index_schemas_route::index_schemas,
};

/// Builds the application state, wires the router, and serves until ctrl-c.
///
/// # Errors
/// Configuration problems (missing env vars, bad endpoints) and bind
/// failures.
pub async fn start() -> Result<(), Box<dyn Error>> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    // The local frontend dev server is the only expected browser origin.
    let frontend_origin =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".into());
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ask", get(ask_question))
        .route("/index_schemas", post(index_schemas))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    info!("listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when ctrl-c is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
