//! Natural-language to filter-expression translation.
//!
//! Public API: [`translate`]. It builds the instruction prompt, calls the
//! completion provider, strips code fences from the response, parses the
//! JSON, and strictly validates the `query` object into a
//! [`FilterExpression`]. The first failing step aborts the attempt; there
//! are no retries.
//!
//! The completion side is a trait seam ([`CompletionProvider`]) so tests
//! drive the whole pipeline with canned responses.

mod error;
pub mod prompt;
pub mod sanitize;

pub use error::TranslateError;

use chrono::Utc;
use llm_service::CompletionProvider;
use student_store::FilterExpression;
use tracing::{debug, instrument};

/// Translates a free-text question into a validated filter expression.
///
/// # Errors
/// - [`TranslateError::EmptyInput`] for blank input, before any external call
/// - [`TranslateError::Completion`] if the completion service fails
/// - [`TranslateError::MalformedOutput`] / [`TranslateError::MissingQueryField`]
///   / [`TranslateError::EmptyQuery`] / [`TranslateError::InvalidFilter`] for
///   output that deviates from the taught grammar
#[instrument(skip_all)]
pub async fn translate<P: CompletionProvider>(
    provider: &P,
    user_text: &str,
) -> Result<FilterExpression, TranslateError> {
    let text = user_text.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyInput);
    }

    let prompt = prompt::build_prompt(text, Utc::now().date_naive());
    debug!(prompt_chars = prompt.len(), "requesting filter translation");

    let raw = provider.complete(&prompt).await?;
    debug!(response_chars = raw.len(), "completion received");

    parse_completion(&raw)
}

/// Parses raw completion output into a filter expression.
///
/// Split out of [`translate`] so the output-handling path is testable
/// without a provider.
pub fn parse_completion(raw: &str) -> Result<FilterExpression, TranslateError> {
    let cleaned = sanitize::strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| TranslateError::MalformedOutput(e.to_string()))?;

    let query = value.get("query").ok_or(TranslateError::MissingQueryField)?;
    if query.as_object().is_some_and(|m| m.is_empty()) {
        return Err(TranslateError::EmptyQuery);
    }

    FilterExpression::from_query_value(query).map_err(TranslateError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_service::{LlmError, Result as LlmResult};
    use std::future::Future;

    /// Provider returning a fixed response.
    struct Canned(&'static str);

    impl CompletionProvider for Canned {
        fn complete(&self, _prompt: &str) -> impl Future<Output = LlmResult<String>> + Send {
            std::future::ready(Ok(self.0.to_string()))
        }
    }

    /// Provider that must never be reached.
    struct Unreachable;

    impl CompletionProvider for Unreachable {
        fn complete(&self, _prompt: &str) -> impl Future<Output = LlmResult<String>> + Send {
            async { panic!("completion service called for invalid input") }
        }
    }

    /// Provider simulating a service outage.
    struct Failing;

    impl CompletionProvider for Failing {
        fn complete(&self, _prompt: &str) -> impl Future<Output = LlmResult<String>> + Send {
            std::future::ready(Err(LlmError::Decode("connection refused".into())))
        }
    }

    #[tokio::test]
    async fn blank_input_fails_before_any_call() {
        for input in ["", "   ", "\n\t"] {
            let err = translate(&Unreachable, input).await.unwrap_err();
            assert!(matches!(err, TranslateError::EmptyInput));
        }
    }

    #[tokio::test]
    async fn plain_output_yields_filter() {
        let f = translate(&Canned(r#"{"query": {"roll_no": 6250}}"#), "roll number 6250")
            .await
            .unwrap();
        assert_eq!(f.len(), 1);
        assert!(!f.is_empty());
    }

    #[tokio::test]
    async fn fenced_output_equals_unfenced() {
        let unfenced = translate(
            &Canned(r#"{"query": {"status": "active"}}"#),
            "active students",
        )
        .await
        .unwrap();
        let fenced = translate(
            &Canned("```json\n{\"query\": {\"status\": \"active\"}}\n```"),
            "active students",
        )
        .await
        .unwrap();
        assert_eq!(unfenced, fenced);
    }

    #[tokio::test]
    async fn empty_query_object_is_a_translation_error() {
        let err = translate(&Canned(r#"{"query": {}}"#), "anything")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::EmptyQuery));
    }

    #[tokio::test]
    async fn missing_query_key_is_a_translation_error() {
        let err = translate(&Canned(r#"{"filter": {"status": "active"}}"#), "anything")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::MissingQueryField));
    }

    #[tokio::test]
    async fn non_json_output_is_a_translation_error() {
        let err = translate(&Canned("Sorry, I cannot help with that."), "anything")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn service_failure_propagates_as_completion_error() {
        let err = translate(&Failing, "anything").await.unwrap_err();
        assert!(matches!(err, TranslateError::Completion(_)));
    }

    #[tokio::test]
    async fn out_of_schema_filter_is_rejected() {
        let err = translate(
            &Canned(r#"{"query": {"grade": "A", "status": "active"}}"#),
            "grade A students",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TranslateError::InvalidFilter(_)));
    }

    #[test]
    fn parse_completion_never_returns_empty_filter() {
        // Every successful parse carries at least one clause.
        let ok = parse_completion(r#"{"query": {"status": "active"}}"#).unwrap();
        assert!(!ok.is_empty());
        assert!(parse_completion(r#"{"query": {}}"#).is_err());
    }

    #[tokio::test]
    async fn end_to_end_active_students() {
        use chrono::NaiveDate;
        use student_store::{StoreConfig, StudentRecord, StudentStore};

        let dir = tempfile::tempdir().unwrap();
        let store = StudentStore::open(&StoreConfig::new_default(dir.path())).unwrap();
        store
            .insert_many(&[
                StudentRecord {
                    name: "Neha Bhatt".into(),
                    roll_no: 6250,
                    email: "neha.bhatt8b@example.com".into(),
                    phone_no: 9380005468,
                    address: "Dehradun".into(),
                    dob: NaiveDate::from_ymd_opt(2010, 7, 12).unwrap(),
                    class: "8B".into(),
                    status: "active".into(),
                },
                StudentRecord {
                    name: "Sara Iyer".into(),
                    roll_no: 7310,
                    email: "sara.iyer@example.com".into(),
                    phone_no: 9933127755,
                    address: "Bengaluru".into(),
                    dob: NaiveDate::from_ymd_opt(2006, 11, 21).unwrap(),
                    class: "12C".into(),
                    status: "graduated".into(),
                },
            ])
            .unwrap();

        let filter = translate(
            &Canned(r#"{"query": {"status": "active"}}"#),
            "Show all active students",
        )
        .await
        .unwrap();

        let hits = store.find(&filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].roll_no, 6250);
        assert_eq!(hits[0].status, "active");
    }
}
