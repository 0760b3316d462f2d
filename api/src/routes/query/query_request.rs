use serde::{Deserialize, Serialize};
use student_store::StudentRecord;

/// Request payload for /query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural-language question about the student collection.
    pub query: String,
}

/// Response payload for /query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Human-readable outcome line.
    pub message: String,
    /// Matching records; empty on a successful no-match lookup.
    pub results: Vec<StudentRecord>,
}

impl QueryResponse {
    /// Wraps an executed result set, keeping the no-match case an explicit
    /// success rather than an error.
    pub fn from_results(results: Vec<StudentRecord>) -> Self {
        let message = if results.is_empty() {
            "No students found matching the query".into()
        } else {
            "Query executed successfully".into()
        };
        Self { message, results }
    }
}
