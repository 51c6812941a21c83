//! Question-to-SQL pipeline: retrieve schema context, generate a statement,
//! gate it to SELECT-only, execute it against Postgres.
//!
//! Every service handle is injected at construction (no ambient singletons):
//! build the [`QueryPipeline`] once at process start and share it. One call to
//! [`QueryPipeline::ask`] is one sequential chain of awaited external calls;
//! the pipeline holds no locks and caches nothing between requests.

mod errors;
mod executor;
mod gatekeeper;
mod generator;

pub use errors::PipelineError;
pub use executor::{DbConfig, ResultRow};
pub use gatekeeper::{RejectedStatement, authorize};
pub use generator::{build_prompt, strip_markdown_fences};

use std::sync::Arc;

use deadpool_postgres::Pool;
use llm_service::LlmServiceProfiles;
use schema_store::{EmbeddingsProvider, SchemaStore};
use tracing::{info, instrument};

/// Outcome of one question, as seen by the caller.
///
/// A gatekeeper rejection is an expected, user-visible outcome and therefore
/// data, not an error.
#[derive(Debug)]
pub enum AskOutcome {
    /// The statement passed the gatekeeper and executed.
    Answered {
        generated_sql: String,
        rows: Vec<ResultRow>,
    },
    /// The gatekeeper refused the statement; `generated_sql` is the
    /// post-strip text for diagnostic display.
    Rejected { generated_sql: String },
}

/// The wired pipeline: LLM profiles, schema store, embedding seam, DB pool.
pub struct QueryPipeline {
    llm: Arc<LlmServiceProfiles>,
    store: SchemaStore,
    embedder: Box<dyn EmbeddingsProvider>,
    pool: Pool,
}

impl QueryPipeline {
    /// Wires the pipeline from already-constructed services.
    pub fn new(
        llm: Arc<LlmServiceProfiles>,
        store: SchemaStore,
        embedder: Box<dyn EmbeddingsProvider>,
        pool: Pool,
    ) -> Self {
        Self {
            llm,
            store,
            embedder,
            pool,
        }
    }

    /// Runs the full chain for one question:
    /// retrieve → generate → authorize → execute.
    ///
    /// # Errors
    /// Index, generation, and database failures propagate as
    /// [`PipelineError`]; a gatekeeper rejection is returned as
    /// [`AskOutcome::Rejected`] instead.
    #[instrument(skip_all, fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<AskOutcome, PipelineError> {
        let sql =
            generator::generate(&self.llm, &self.store, self.embedder.as_ref(), question).await?;

        match gatekeeper::authorize(sql) {
            Ok(sql) => {
                let rows = executor::execute(&self.pool, &sql).await?;
                info!(rows = rows.len(), "question answered");
                Ok(AskOutcome::Answered {
                    generated_sql: sql,
                    rows,
                })
            }
            Err(rejection) => {
                info!("generated statement rejected by gatekeeper");
                Ok(AskOutcome::Rejected {
                    generated_sql: rejection.sql,
                })
            }
        }
    }

    /// Rebuilds the schema index from `descriptions` (offline batch step).
    ///
    /// # Errors
    /// Propagates embedding and index failures.
    pub async fn rebuild_index(&self, descriptions: &[String]) -> Result<usize, PipelineError> {
        let count = self
            .store
            .build_index(descriptions, self.embedder.as_ref())
            .await?;
        Ok(count)
    }

    /// Verifies database connectivity with `SELECT 1`.
    ///
    /// # Errors
    /// Pool or execution failures.
    pub async fn ping_database(&self) -> Result<(), PipelineError> {
        executor::ping(&self.pool).await
    }

    /// The LLM profiles backing this pipeline (for health reporting).
    pub fn llm_profiles(&self) -> &Arc<LlmServiceProfiles> {
        &self.llm
    }
}
