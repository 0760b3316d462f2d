//! Completion-service clients for the student lookup pipeline.
//!
//! Providers:
//! - Gemini (`generateContent`, the default)
//! - Ollama (`/api/generate`, for local models)
//!
//! The crate exposes:
//! - [`config`] — provider/model configuration and strict env-driven defaults
//! - [`services`] — thin per-provider HTTP clients
//! - [`completion`] — the [`completion::CompletionService`] wrapper and the
//!   [`completion::CompletionProvider`] trait seam used by callers and tests
//! - [`health_service`] — best-effort provider probes for a `/health` endpoint

pub mod completion;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;

pub use completion::{CompletionProvider, CompletionService};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{ConfigError, LlmError, Result};
