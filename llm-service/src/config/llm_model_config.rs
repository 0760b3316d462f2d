use crate::config::llm_provider::LlmProvider;

/// Configuration for a completion-service invocation.
///
/// One struct covers both providers; fields a provider does not use are
/// simply ignored by its client (e.g., `api_key` for Ollama).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The completion backend (Gemini or Ollama).
    pub provider: LlmProvider,

    /// Model identifier (e.g., `"gemini-1.5-flash"`, `"qwen3:14b"`).
    pub model: String,

    /// API base URL (e.g., `https://generativelanguage.googleapis.com`).
    pub endpoint: String,

    /// API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature. Query translation wants low values.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
