//! POST /query — translate the question, run the filter, return records.

use std::sync::Arc;

use axum::{Json, extract::State};
use query_translator::translate;
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::query::query_request::{QueryRequest, QueryResponse},
};

/// Handler: POST /query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"query":"Show all active students"}'
/// ```
pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    let question = body.query.trim();
    if question.is_empty() {
        return Err(AppError::MissingInput);
    }

    let filter = translate(&state.completion, question).await?;
    debug!(clauses = filter.len(), "question translated to filter");

    let results = state.store.find(&filter)?;
    info!(hits = results.len(), "query executed");

    Ok(Json(QueryResponse::from_results(results)))
}
