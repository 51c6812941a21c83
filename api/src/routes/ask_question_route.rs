//! GET /ask — full question-to-SQL pipeline.

use std::sync::Arc;

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use sql_pipeline::{AskOutcome, PipelineError, ResultRow};

use crate::core::app_state::AppState;

#[derive(Deserialize)]
pub struct AskParams {
    pub question: String,
}

/// Response for an executed question.
#[derive(Serialize)]
pub struct AskAnswered {
    pub question: String,
    pub generated_sql: String,
    pub result: Vec<ResultRow>,
}

/// Response for a statement the gatekeeper refused. Still HTTP 200: the
/// rejection is an expected outcome, reported as data.
#[derive(Serialize)]
pub struct AskRejected {
    pub error: &'static str,
    pub generated_sql: String,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum AskResponse {
    Answered(AskAnswered),
    Rejected(AskRejected),
}

/// Handler: GET /ask?question=...
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8000/ask?question=How%20many%20orders%20were%20placed%20for%20product%201%3F'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let outcome = state
        .pipeline
        .ask(&params.question)
        .await
        .map_err(map_pipeline_error)?;

    let response = match outcome {
        AskOutcome::Answered {
            generated_sql,
            rows,
        } => AskResponse::Answered(AskAnswered {
            question: params.question,
            generated_sql,
            result: rows,
        }),
        AskOutcome::Rejected { generated_sql } => AskResponse::Rejected(AskRejected {
            error: "Only SELECT queries are allowed.",
            generated_sql,
        }),
    };

    Ok(Json(response))
}

/// Maps pipeline failures to HTTP statuses: upstream collaborators (index,
/// model) are 502, database-side failures are 500 with the engine message.
fn map_pipeline_error(err: PipelineError) -> (StatusCode, String) {
    let status = match err {
        PipelineError::Index(_) | PipelineError::Llm(_) | PipelineError::EmptyCompletion => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::Config(_)
        | PipelineError::Pool(_)
        | PipelineError::CreatePool(_)
        | PipelineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
