//! Completion output normalization.
//!
//! Completion services routinely wrap JSON in markdown code fences despite
//! instructions not to, so the raw text is de-fenced before parsing. The
//! operation is idempotent and a no-op on fence-free text.

/// Strips triple-backtick fences (with or without a `json` tag) and
/// surrounding whitespace from a completion response.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_tagged_fences() {
        let raw = "```json\n{\"query\": {\"status\": \"active\"}}\n```";
        assert_eq!(strip_code_fences(raw), "{\"query\": {\"status\": \"active\"}}");
    }

    #[test]
    fn removes_untagged_fences() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn noop_on_fence_free_text() {
        let raw = "{\"query\": {\"roll_no\": 6250}}";
        assert_eq!(strip_code_fences(raw), raw);
    }

    #[test]
    fn idempotent() {
        let raw = "```json\n{\"query\": {}}\n```";
        let once = strip_code_fences(raw);
        assert_eq!(strip_code_fences(&once), once);
    }
}
