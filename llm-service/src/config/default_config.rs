//! Completion configs loaded strictly from environment variables.
//!
//! The translator needs near-deterministic output, so both constructors
//! default to a low temperature and a modest token budget.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`       = provider kind, `gemini` (default) or `ollama`
//! - `LLM_MAX_TOKENS` = optional generation cap (u32)
//!
//! Gemini:
//! - `GEMINI_API_KEY` = API key (mandatory)
//! - `GEMINI_MODEL`   = model id, defaults to `gemini-1.5-flash`
//! - `GEMINI_URL`     = API base, defaults to the public endpoint
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = model id (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, Result, env_opt_u32, must_env},
};

/// Public Gemini API base used when `GEMINI_URL` is unset.
const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com";

/// Resolves the completion config from `LLM_KIND` and the provider-specific
/// variables. Unset `LLM_KIND` means Gemini, matching the original service.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - provider-specific errors from [`config_gemini`] / [`config_ollama`]
pub fn completion_config_from_env() -> Result<LlmModelConfig> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "gemini".into());
    match kind.trim().to_ascii_lowercase().as_str() {
        "" | "gemini" => config_gemini(),
        "ollama" => config_ollama(),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

/// Constructs the Gemini completion config.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_MODEL`, `GEMINI_URL`, `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic filter generation)
/// - `timeout_secs = Some(30)`
pub fn config_gemini() -> Result<LlmModelConfig> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = std::env::var("GEMINI_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "gemini-1.5-flash".into());
    let endpoint = std::env::var("GEMINI_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| GEMINI_DEFAULT_URL.into());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Constructs the Ollama completion config.
///
/// Endpoint precedence: `OLLAMA_URL` if present, otherwise
/// `http://localhost:{OLLAMA_PORT}`.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if neither endpoint variable is set
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is not a valid port
pub fn config_ollama() -> Result<LlmModelConfig> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
    })
}

fn ollama_endpoint() -> Result<String> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}
