//! Application error type and HTTP mapping.
//!
//! Every failure surfaces to the caller as `{ "error": CODE, "message": … }`
//! with an appropriate status. Upstream causes (completion-service outage
//! vs. malformed model output) are logged here but collapsed into generic
//! messages for the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use query_translator::TranslateError;
use serde::Serialize;
use student_store::StoreError;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("startup error: {0}")]
    Startup(#[from] llm_service::LlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request pipeline ---
    #[error("missing 'query' in request body")]
    MissingInput,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Translate(TranslateError::EmptyInput) => StatusCode::BAD_REQUEST,
            AppError::Translate(TranslateError::Completion(_)) => StatusCode::BAD_GATEWAY,
            AppError::Translate(_) => StatusCode::BAD_REQUEST,

            // 5xx
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Startup(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Startup(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::MissingInput => "MISSING_INPUT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Translate(TranslateError::EmptyInput) => "MISSING_INPUT",
            AppError::Translate(TranslateError::Completion(_)) => "COMPLETION_UNAVAILABLE",
            AppError::Translate(_) => "INVALID_QUERY_GENERATED",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Client-facing message; upstream details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::MissingInput | AppError::Translate(TranslateError::EmptyInput) => {
                "Missing 'query' in request body".into()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Translate(TranslateError::Completion(_)) => {
                "The completion service is unavailable".into()
            }
            AppError::Translate(_) => "Empty or invalid query generated".into(),
            AppError::Storage(_) => "Failed to query the student store".into(),
            _ => "Internal server error".into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "request rejected");
        }

        let body = ErrorBody {
            error: self.error_code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert body-extraction rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
