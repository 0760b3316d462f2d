use llm_service::{
    CompletionService, LlmModelConfig, config::default_config::completion_config_from_env,
    health_service::HealthService,
};
use student_store::{StoreConfig, StudentStore};

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
///
/// Everything here is constructed once by [`AppState::from_env`] at process
/// start and injected into handlers via `State` — no module-global clients.
pub struct AppState {
    /// Completion backend used by the query translator.
    pub completion: CompletionService,
    /// Student record store.
    pub store: StudentStore,
    /// Config the completion service was built from (for health probes).
    pub llm_config: LlmModelConfig,
    /// Reusable health checker.
    pub health: HealthService,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Env
    /// - completion: `LLM_KIND` plus provider variables (see `llm-service`)
    /// - store: `STORE_PATH` (default `data/students.db`),
    ///   `STORE_COLLECTION` (default `students`)
    pub fn from_env() -> AppResult<Self> {
        let llm_config = completion_config_from_env()?;
        let completion = CompletionService::new(llm_config.clone())?;

        let store_path =
            std::env::var("STORE_PATH").unwrap_or_else(|_| "data/students.db".into());
        let mut store_cfg = StoreConfig::new_default(store_path);
        if let Ok(collection) = std::env::var("STORE_COLLECTION") {
            if !collection.trim().is_empty() {
                store_cfg.collection = collection;
            }
        }
        let store = StudentStore::open(&store_cfg).map_err(AppError::Storage)?;

        let health = HealthService::new(Some(5))?;

        Ok(Self {
            completion,
            store,
            llm_config,
            health,
        })
    }
}
