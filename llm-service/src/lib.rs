//! LLM client layer: chat completion and embeddings over HTTP providers.
//!
//! Two providers are supported:
//! - **OpenAI-compatible** servers (`/v1/chat/completions`, `/v1/embeddings`),
//!   which covers both the OpenAI API and local runtimes such as LM Studio.
//! - **Ollama** (`/api/generate`, `/api/embeddings`).
//!
//! Application code talks to [`service_profiles::LlmServiceProfiles`]: one
//! instance constructed at startup, wrapped in `Arc`, passed into dependents.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
