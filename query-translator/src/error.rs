//! Typed error for the query-translator crate.

use llm_service::LlmError;
use student_store::FilterError;
use thiserror::Error;

/// Failure modes of a translation attempt, in pipeline order.
///
/// `EmptyInput` is detected before any external call. The remaining
/// variants distinguish completion-service failures from output-shape
/// problems for logging; callers surface them as one generic translation
/// failure.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Caller supplied no text.
    #[error("input text is empty")]
    EmptyInput,

    /// The completion service was unreachable or errored.
    #[error("completion service failed: {0}")]
    Completion(#[from] LlmError),

    /// Completion output was not parseable JSON.
    #[error("malformed completion output: {0}")]
    MalformedOutput(String),

    /// Completion output parsed, but carries no `query` key.
    #[error("completion output has no `query` field")]
    MissingQueryField,

    /// The generated query object was empty.
    #[error("generated query is empty")]
    EmptyQuery,

    /// The generated filter fell outside the taught grammar.
    #[error("generated filter was rejected: {0}")]
    InvalidFilter(#[from] FilterError),
}
