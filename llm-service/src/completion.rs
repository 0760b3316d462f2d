//! Provider-dispatching completion service.
//!
//! [`CompletionService`] is constructed once at process start from an
//! explicit [`LlmModelConfig`] and shared behind `Arc` — there is no
//! module-global client state. The [`CompletionProvider`] trait is the seam
//! the translator programs against, so tests can substitute a canned
//! implementation without any network.

use std::future::Future;

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::Result;
use crate::services::{gemini_service::GeminiService, ollama_service::OllamaService};

/// Interface for one-shot text completion.
///
/// Mirrors the shape of the underlying clients: one prompt in, generated
/// text out. Implementors must be shareable across request handlers.
pub trait CompletionProvider: Send + Sync {
    /// Produces a completion for the given prompt.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

enum ProviderClient {
    Gemini(GeminiService),
    Ollama(OllamaService),
}

/// Completion service backed by the configured provider.
///
/// Construct once, wrap in `Arc`, and pass clones of the handle to
/// dependents. The underlying HTTP client is reused across calls.
pub struct CompletionService {
    client: ProviderClient,
    cfg: LlmModelConfig,
}

impl CompletionService {
    /// Builds the provider client selected by `cfg.provider`.
    ///
    /// # Errors
    /// Fails if the client cannot be constructed (invalid endpoint, missing
    /// API key, HTTP client build failure).
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let client = match cfg.provider {
            LlmProvider::Gemini => ProviderClient::Gemini(GeminiService::new(cfg.clone())?),
            LlmProvider::Ollama => ProviderClient::Ollama(OllamaService::new(cfg.clone())?),
        };
        Ok(Self { client, cfg })
    }

    /// The config this service was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}

impl CompletionProvider for CompletionService {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send {
        async move {
            match &self.client {
                ProviderClient::Gemini(svc) => svc.generate(prompt).await,
                ProviderClient::Ollama(svc) => svc.generate(prompt).await,
            }
        }
    }
}

impl std::fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionService")
            .field("provider", &self.cfg.provider)
            .field("model", &self.cfg.model)
            .finish()
    }
}
