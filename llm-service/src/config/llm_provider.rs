use std::str::FromStr;

use crate::error_handler::{ConfigError, LlmError};

/// Backend used for LLM inference and embeddings.
///
/// `OpenAi` covers every server that speaks the OpenAI REST shape, which
/// includes LM Studio and other local OpenAI-compatible runtimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI API or any OpenAI-compatible server (LM Studio, vLLM, ...).
    OpenAi,
    /// Local Ollama runtime.
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "open-ai" | "lmstudio" | "lm-studio" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert_eq!("LM-Studio".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert_eq!("Ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert!("mistral-api".parse::<LlmProvider>().is_err());
    }
}
