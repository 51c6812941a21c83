//! Shared LLM service with two active profiles: **completion** and **embedding**.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - If the embedding profile equals the completion profile, one client is shared.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::{
        default_config::{completion_config_from_env, embedding_config_from_env},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::LlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Shared service managing the **completion** and **embedding** profiles.
///
/// Internally caches OpenAI/Ollama clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    completion: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
}

impl LlmServiceProfiles {
    /// Creates a new service with explicit profiles.
    pub fn new(completion: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            completion,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
        }
    }

    /// Creates the service from environment variables.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] when mandatory variables are missing or
    /// malformed.
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::new(
            completion_config_from_env()?,
            embedding_config_from_env()?,
        ))
    }

    /// Generates text using the **completion** profile.
    ///
    /// # Arguments
    /// - `prompt`: user prompt.
    /// - `system`: optional system instruction.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the provider call fails or yields no choices.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        match self.completion.provider {
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.completion).await?;
                cli.complete(prompt, system).await
            }
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.completion).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    /// Computes an embedding vector using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the provider call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        match self.embedding.provider {
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings(input).await
            }
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.embedding).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Returns references to the current profiles `(completion, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.completion, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        let mut w = self.ollama.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        let mut w = self.openai.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }
}

/// Internal cache key identifying a unique client config.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAi,
            model: model.into(),
            endpoint: "http://127.0.0.1:1234".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn client_cache_reuses_identical_configs() {
        let svc = LlmServiceProfiles::new(cfg("m"), cfg("m"));
        let a = svc.get_or_init_openai(&svc.completion).await.unwrap();
        let b = svc.get_or_init_openai(&svc.embedding).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn client_cache_splits_distinct_models() {
        let svc = LlmServiceProfiles::new(cfg("chat"), cfg("embed"));
        let a = svc.get_or_init_openai(&svc.completion).await.unwrap();
        let b = svc.get_or_init_openai(&svc.embedding).await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
