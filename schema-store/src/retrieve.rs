//! Retrieval: embed the question, search top-k, join the schema payloads.

use tracing::trace;

use crate::config::IndexConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::IndexError;
use crate::index::SCHEMA_PAYLOAD_KEY;
use crate::qdrant_facade::QdrantFacade;

/// Embeds `question` and returns the top-k schema descriptions joined with
/// newlines, best match first.
///
/// # Errors
/// [`IndexError::Empty`] when the search yields no points (empty index),
/// [`IndexError::Unavailable`] when Qdrant cannot be reached, and embedding
/// errors from the provider.
pub async fn retrieve(
    cfg: &IndexConfig,
    client: &QdrantFacade,
    question: &str,
    provider: &dyn EmbeddingsProvider,
) -> Result<String, IndexError> {
    trace!("retrieve top_k={} question={question:?}", cfg.top_k);

    let query_vector = provider.embed(question).await?;
    let hits = client.search(query_vector, cfg.top_k).await?;

    if hits.is_empty() {
        return Err(IndexError::Empty {
            collection: cfg.collection.clone(),
        });
    }

    Ok(concat_schema_texts(&hits))
}

/// Joins the `schema` payload fields with `\n`, preserving hit order.
///
/// Hits without a textual `schema` field are skipped.
fn concat_schema_texts(hits: &[(f32, serde_json::Value)]) -> String {
    hits.iter()
        .filter_map(|(_, payload)| payload.get(SCHEMA_PAYLOAD_KEY).and_then(|v| v.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_in_ranked_order() {
        let hits = vec![
            (0.92, json!({ "schema": "Table orders(id, product_id, quantity, price, date)" })),
            (0.85, json!({ "schema": "Table products(id, name, category)" })),
        ];
        let text = concat_schema_texts(&hits);
        assert_eq!(
            text,
            "Table orders(id, product_id, quantity, price, date)\nTable products(id, name, category)"
        );
    }

    #[test]
    fn skips_hits_without_schema_field() {
        let hits = vec![
            (0.9, json!({ "schema": "Table products(id, name, category)" })),
            (0.5, json!({ "other": 1 })),
        ];
        assert_eq!(
            concat_schema_texts(&hits),
            "Table products(id, name, category)"
        );
    }

    #[test]
    fn single_hit_has_no_trailing_newline() {
        let hits = vec![(1.0, json!({ "schema": "Table products(id, name, category)" }))];
        assert_eq!(
            concat_schema_texts(&hits),
            "Table products(id, name, category)"
        );
    }
}
