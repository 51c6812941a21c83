use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM endpoint/model pair.
///
/// The same struct is used for completion and embedding profiles; only the
/// model (and possibly the endpoint) differs between the two.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The provider/backend behind `endpoint`.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"qwen2.5-coder-7b-instruct"`).
    pub model: String,

    /// Inference endpoint base URL.
    pub endpoint: String,

    /// Optional API key. Local OpenAI-compatible servers accept any value,
    /// so this may stay `None` even for the OpenAi provider.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature. `Some(0.0)` requests deterministic sampling.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds for every call made with this config.
    pub timeout_secs: Option<u64>,
}
