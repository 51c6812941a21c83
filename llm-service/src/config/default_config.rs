//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are configured:
//!
//! - **Completion** → synthesizes SQL from a prompt. Temperature is pinned to
//!   0 so repeated calls with identical input are expected to produce the
//!   same statement (the model remains an external black box, so this is an
//!   expectation, not a guarantee).
//! - **Embedding**  → encodes text into a fixed-length vector.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`openai`, `lmstudio`, `ollama`); default `openai`
//! - `LLM_URL`          = completion endpoint (mandatory)
//! - `LLM_MODEL`        = completion model name (mandatory)
//! - `LLM_API_KEY`      = optional API key
//! - `LLM_MAX_TOKENS`   = optional max tokens (u64)
//! - `LLM_TIMEOUT_SECS` = per-request timeout, default 60
//!
//! Embedding:
//! - `EMBEDDING_MODEL`  = embedding model name (mandatory)
//! - `EMBEDDING_URL`    = embedding endpoint; falls back to `LLM_URL`
//! - `EMBEDDING_KIND`   = embedding provider; falls back to `LLM_KIND`

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, env_opt, env_opt_u64, must_env, validate_http_endpoint},
};

fn provider_from(var: &str, default: LlmProvider) -> Result<LlmProvider, LlmError> {
    match env_opt(var) {
        Some(v) => v.parse(),
        None => Ok(default),
    }
}

/// Constructs the **completion** profile from the environment.
///
/// # Errors
/// Missing `LLM_URL`/`LLM_MODEL`, an invalid endpoint scheme, or an
/// unsupported `LLM_KIND` value.
pub fn completion_config_from_env() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_from("LLM_KIND", LlmProvider::OpenAi)?;
    let endpoint = must_env("LLM_URL")?;
    validate_http_endpoint("LLM_URL", &endpoint)?;
    let model = must_env("LLM_MODEL")?;
    let max_tokens = env_opt_u64("LLM_MAX_TOKENS")?.map(|v| v as u32);
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: env_opt("LLM_API_KEY"),
        max_tokens,
        // SQL generation must be as repeatable as the backend allows.
        temperature: Some(0.0),
        top_p: None,
        timeout_secs,
    })
}

/// Constructs the **embedding** profile from the environment.
///
/// Falls back to the completion endpoint/provider when no dedicated
/// embedding endpoint is configured, which is the common LM Studio setup.
///
/// # Errors
/// Missing `EMBEDDING_MODEL`, missing endpoint, or invalid values.
pub fn embedding_config_from_env() -> Result<LlmModelConfig, LlmError> {
    let provider = match env_opt("EMBEDDING_KIND") {
        Some(v) => v.parse()?,
        None => provider_from("LLM_KIND", LlmProvider::OpenAi)?,
    };
    // Validation errors must name the variable the value actually came from.
    let (endpoint_var, endpoint) = match env_opt("EMBEDDING_URL") {
        Some(v) => ("EMBEDDING_URL", v),
        None => ("LLM_URL", must_env("LLM_URL")?),
    };
    validate_http_endpoint(endpoint_var, &endpoint)?;
    let model = must_env("EMBEDDING_MODEL")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: env_opt("LLM_API_KEY"),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_endpoint_error_names_the_source_var() {
        unsafe {
            std::env::remove_var("EMBEDDING_URL");
            std::env::set_var("LLM_URL", "localhost:1234");
            std::env::set_var("EMBEDDING_MODEL", "all-minilm-l6-v2");
        }
        let err = embedding_config_from_env().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("LLM_URL"), "got: {msg}");
        assert!(!msg.contains("EMBEDDING_URL"), "got: {msg}");
        unsafe {
            std::env::remove_var("LLM_URL");
            std::env::remove_var("EMBEDDING_MODEL");
        }
    }
}
