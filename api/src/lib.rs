//! HTTP surface of the student lookup service.
//!
//! Routes:
//! - `POST /query`  — natural-language student lookup
//! - `GET  /health` — completion-backend probe + store record count

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::routes::{health::health_route::health, query::query_route::handle_query};

/// Builds the application state from the environment, binds the listener,
/// and serves until ctrl-c.
///
/// # Errors
/// Returns [`AppError`] for config problems, bind failures, or a server
/// error while running.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = std::env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".into());

    let app = Router::new()
        .route("/query", post(handle_query))
        .route("/health", get(health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    tracing::info!("listening on {host_url}");

    // Serve with graceful shutdown on ctrl-c.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when ctrl-c is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
