//! SQL generation: prompt construction, completion call, fence stripping.

use std::sync::Arc;

use llm_service::LlmServiceProfiles;
use schema_store::{EmbeddingsProvider, SchemaStore};
use tracing::{debug, instrument};

use crate::errors::PipelineError;

/// System instruction passed with every completion call.
const SYSTEM_PROMPT: &str = "You generate SQL queries.";

/// Builds the fixed prompt template around the retrieved schema block and the
/// verbatim question.
pub fn build_prompt(schemas: &str, question: &str) -> String {
    format!(
        "You are a PostgreSQL expert.\n\
         \n\
         Here are the available tables:\n\
         {schemas}\n\
         \n\
         Generate ONLY a safe SELECT SQL query for this question:\n\
         \"{question}\"\n\
         \n\
         Return only raw SQL.\n\
         No markdown.\n\
         No explanation.\n"
    )
}

/// Removes every literal ```` ```sql ```` and ```` ``` ```` marker anywhere in
/// the text, then trims.
///
/// Substring removal is intentional (it mirrors the specified behavior) even
/// though a fence-like sequence inside a quoted SQL literal would also be
/// stripped. Idempotent: clean SQL passes through untouched.
pub fn strip_markdown_fences(raw: &str) -> String {
    raw.trim()
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Generates raw SQL text for `question`.
///
/// Retrieves the relevant schema descriptions, fills the prompt template,
/// calls the completion profile (temperature 0 comes from the profile
/// config), and sanitizes the output. The returned SQL is unquoted and
/// unescaped; the gatekeeper is responsible for safety validation.
///
/// # Errors
/// Index failures, model failures, or [`PipelineError::EmptyCompletion`] when
/// nothing survives fence stripping — an empty statement is never returned
/// silently.
#[instrument(skip_all, fields(question_len = question.len()))]
pub async fn generate(
    llm: &Arc<LlmServiceProfiles>,
    store: &SchemaStore,
    provider: &dyn EmbeddingsProvider,
    question: &str,
) -> Result<String, PipelineError> {
    let schemas = store.retrieve(question, provider).await?;
    debug!(schemas_len = schemas.len(), "retrieved schema context");

    let prompt = build_prompt(&schemas, question);
    let raw = llm.complete(&prompt, Some(SYSTEM_PROMPT)).await?;

    let sql = strip_markdown_fences(&raw);
    if sql.is_empty() {
        return Err(PipelineError::EmptyCompletion);
    }

    debug!(%sql, "generated SQL");
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_schema_and_verbatim_question() {
        let schemas = "Table orders(id, product_id, quantity, price, date)\n\
                       Table products(id, name, category)";
        let question = "How many orders were placed for product 1?";
        let prompt = build_prompt(schemas, question);

        assert!(prompt.contains(schemas));
        assert!(prompt.contains("\"How many orders were placed for product 1?\""));
        assert!(prompt.contains("ONLY a safe SELECT SQL query"));
    }

    #[test]
    fn strips_sql_fences() {
        let raw = "```sql\nSELECT COUNT(*) AS total FROM orders WHERE product_id = 1;\n```";
        assert_eq!(
            strip_markdown_fences(raw),
            "SELECT COUNT(*) AS total FROM orders WHERE product_id = 1;"
        );
    }

    #[test]
    fn strips_generic_fences() {
        let raw = "```\nSELECT 1\n```";
        assert_eq!(strip_markdown_fences(raw), "SELECT 1");
    }

    #[test]
    fn stripping_is_idempotent_on_clean_sql() {
        let clean = "SELECT name FROM products WHERE category = 'Fashion'";
        let once = strip_markdown_fences(clean);
        assert_eq!(once, clean);
        assert_eq!(strip_markdown_fences(&once), clean);
    }

    #[test]
    fn strips_fences_anywhere_in_the_text() {
        // Mid-text markers are removed too; this is the specified substring
        // behavior, not an accident.
        let raw = "SELECT 1; ```sql SELECT 2 ```";
        assert_eq!(strip_markdown_fences(raw), "SELECT 1;  SELECT 2");
    }

    #[test]
    fn fenced_drop_table_survives_as_plain_text() {
        // The generator only cleans; the gatekeeper decides.
        let raw = "```sql\nDROP TABLE orders;\n```";
        let sql = strip_markdown_fences(raw);
        assert_eq!(sql, "DROP TABLE orders;");

        let rejection = crate::gatekeeper::authorize(sql).unwrap_err();
        assert_eq!(rejection.sql, "DROP TABLE orders;");
    }
}
