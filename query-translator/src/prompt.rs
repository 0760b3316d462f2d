//! Prompt builder: instruction template plus worked examples.
//!
//! The worked examples are the model's only specification of the filter
//! grammar, so they cover every operator family the executor accepts and
//! nothing it rejects. Age-based examples are computed from the date the
//! caller passes in rather than baked into the template, so they do not
//! drift as years pass.

use chrono::{Datelike, NaiveDate};

/// Instruction template. `{user_input}` and the `{age_*}` year markers are
/// substituted by [`build_prompt`].
const PROMPT_TEMPLATE: &str = r#"You are a query generator for a student information system. Convert the natural language question into a JSON filter.

COLLECTION SCHEMA:
Student documents have exactly these fields:
- name (string): full name
- roll_no (number): unique roll number
- email (string): email address
- phone_no (number): contact phone number
- address (string): postal address
- dob (date): date of birth, YYYY-MM-DD
- class (string): class/grade label, e.g. "8B"
- status (string): "active", "inactive", "graduated", ...

RULES:
1. Return ONLY a JSON object with the filter under a "query" key. No prose, no code fences.
2. The filter must always contain at least one field condition. Never return an empty query object.
3. Supported operators, per field type:
   - exact match: a bare string/number/date value
   - ranges on numbers and dates: "$gt", "$gte", "$lt", "$lte"
   - text search: "$regex" with plain text only (optionally anchored with ^ or $) and "$options": "i"
   - membership: "$in" with a non-empty list
4. Do not use any other operator, and do not use regex syntax beyond the ^ and $ anchors.

EXAMPLES:

## Names
Input: "Find Neha Bhatt"
Output: { "query": { "name": "Neha Bhatt" } }

Input: "Show me students with name containing Kumar"
Output: { "query": { "name": { "$regex": "kumar", "$options": "i" } } }

Input: "Find all students whose name starts with A"
Output: { "query": { "name": { "$regex": "^a", "$options": "i" } } }

## Roll numbers
Input: "Show student with roll number 6250"
Output: { "query": { "roll_no": 6250 } }

Input: "Find students with roll numbers between 1000 and 2000"
Output: { "query": { "roll_no": { "$gte": 1000, "$lte": 2000 } } }

Input: "Students with roll number greater than 5000"
Output: { "query": { "roll_no": { "$gt": 5000 } } }

## Emails
Input: "Find student with email neha.bhatt8b@example.com"
Output: { "query": { "email": "neha.bhatt8b@example.com" } }

Input: "Show students with gmail accounts"
Output: { "query": { "email": { "$regex": "@gmail.com$", "$options": "i" } } }

## Classes
Input: "Show all students in class 8B"
Output: { "query": { "class": "8B" } }

Input: "Find students in classes 10A or 10B"
Output: { "query": { "class": { "$in": ["10A", "10B"] } } }

Input: "Show all grade 12 students"
Output: { "query": { "class": { "$regex": "^12", "$options": "i" } } }

## Addresses
Input: "Find students from Mumbai"
Output: { "query": { "address": { "$regex": "mumbai", "$options": "i" } } }

## Phone numbers
Input: "Find student with phone 9380005468"
Output: { "query": { "phone_no": 9380005468 } }

## Dates of birth
Input: "Students born in 2010"
Output: { "query": { "dob": { "$gte": "2010-01-01", "$lt": "2011-01-01" } } }

Input: "Find students born after 2005"
Output: { "query": { "dob": { "$gt": "2005-12-31" } } }

Input: "Students born on July 12, 2010"
Output: { "query": { "dob": "2010-07-12" } }

Input: "Students aged between 15 and 18"
Output: { "query": { "dob": { "$gte": "{age_hi_year}-01-01", "$lte": "{age_lo_year}-12-31" } } }

## Status
Input: "Show all active students"
Output: { "query": { "status": "active" } }

Input: "Find inactive or graduated students"
Output: { "query": { "status": { "$in": ["inactive", "graduated"] } } }

## Multiple conditions
Input: "Find active students in class 8B"
Output: { "query": { "status": "active", "class": "8B" } }

Input: "Show students named Kumar from Mumbai"
Output: { "query": { "name": { "$regex": "kumar", "$options": "i" }, "address": { "$regex": "mumbai", "$options": "i" } } }

Input: "Active students with roll numbers above 6000"
Output: { "query": { "status": "active", "roll_no": { "$gt": 6000 } } }

## Everyone
Input: "Show all students"
Output: { "query": { "roll_no": { "$gte": 0 } } }

Input: {user_input}
Output:"#;

/// Builds the final prompt for a user question.
///
/// `today` anchors the age-range example years; production callers pass
/// the current date, tests pass a fixed one.
pub fn build_prompt(user_input: &str, today: NaiveDate) -> String {
    // "Aged between 15 and 18" relative to `today`, whole-year precision:
    // oldest are born in year-18, youngest in year-15.
    let age_hi_year = today.year() - 18;
    let age_lo_year = today.year() - 15;

    PROMPT_TEMPLATE
        .replace("{age_hi_year}", &age_hi_year.to_string())
        .replace("{age_lo_year}", &age_lo_year.to_string())
        .replace("{user_input}", user_input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn substitutes_user_input() {
        let p = build_prompt("Show all active students", today());
        assert!(p.contains("Input: Show all active students"));
        assert!(!p.contains("{user_input}"));
    }

    #[test]
    fn age_example_years_follow_the_given_date() {
        let p = build_prompt("q", today());
        assert!(p.contains("\"$gte\": \"2008-01-01\""));
        assert!(p.contains("\"$lte\": \"2011-12-31\""));
        assert!(!p.contains("{age_hi_year}"));
        assert!(!p.contains("{age_lo_year}"));

        let later = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let p = build_prompt("q", later);
        assert!(p.contains("\"$gte\": \"2012-01-01\""));
    }

    #[test]
    fn enumerates_the_closed_schema() {
        let p = build_prompt("q", today());
        for field in [
            "name", "roll_no", "email", "phone_no", "address", "dob", "class", "status",
        ] {
            assert!(p.contains(field), "schema field {field} missing from prompt");
        }
    }
}
