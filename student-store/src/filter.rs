//! Typed filter expressions over student documents.
//!
//! The completion service is taught a Mongo-flavored wire grammar (literal
//! values, `$gt`/`$gte`/`$lt`/`$lte`, `$regex` with `$options: "i"`, `$in`).
//! This module parses that JSON **strictly** into a closed set of tagged
//! variants before anything touches the store: unknown fields, unknown
//! operators, and type-mismatched literals are rejected rather than passed
//! through. An expression with no clauses is invalid by construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::record::StudentRecord;

/// Errors produced while parsing a filter out of model output.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// The `query` value is not a JSON object.
    #[error("filter must be a JSON object")]
    NotAnObject,

    /// The object parsed to zero clauses.
    #[error("filter contains no clauses")]
    Empty,

    /// Field name outside the closed schema.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Operator key outside the closed vocabulary, or not valid for the field.
    #[error("unsupported operator `{op}` on field `{field}`")]
    UnsupportedOperator { field: &'static str, op: String },

    /// Literal type does not fit the field (e.g., string for `roll_no`).
    #[error("type mismatch on field `{field}`: expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// A date literal that is not `YYYY-MM-DD`.
    #[error("invalid date literal: {0}")]
    InvalidDate(String),

    /// A `$regex` pattern beyond the supported anchored-literal shape.
    #[error("unsupported pattern: {0}")]
    UnsupportedPattern(String),

    /// An `$in` list with no elements.
    #[error("empty $in list on field `{0}`")]
    EmptyList(&'static str),
}

/// The eight queryable fields of a student document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    RollNo,
    Email,
    PhoneNo,
    Address,
    Dob,
    Class,
    Status,
}

/// Value category of a field, used to type-check predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

impl Field {
    /// Wire name of the field, as it appears in documents and filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::RollNo => "roll_no",
            Field::Email => "email",
            Field::PhoneNo => "phone_no",
            Field::Address => "address",
            Field::Dob => "dob",
            Field::Class => "class",
            Field::Status => "status",
        }
    }

    /// Resolves a wire name against the closed schema.
    pub fn parse(name: &str) -> Option<Field> {
        match name {
            "name" => Some(Field::Name),
            "roll_no" => Some(Field::RollNo),
            "email" => Some(Field::Email),
            "phone_no" => Some(Field::PhoneNo),
            "address" => Some(Field::Address),
            "dob" => Some(Field::Dob),
            "class" => Some(Field::Class),
            "status" => Some(Field::Status),
            _ => None,
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            Field::RollNo | Field::PhoneNo => FieldKind::Number,
            Field::Dob => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}

/// A typed literal, already checked against its field's kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Text(String),
    Number(i64),
    Date(NaiveDate),
}

/// Where a pattern is anchored within the field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Substring anywhere (`kumar`).
    Anywhere,
    /// Prefix (`^A`).
    Start,
    /// Suffix (`@gmail.com$`).
    End,
    /// Whole value (`^10b$`).
    Exact,
}

/// Case-insensitive literal-text pattern on a text field.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    /// Lowercased literal to search for.
    pub needle: String,
    pub anchor: Anchor,
}

/// Inclusive/exclusive bounds for number fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NumberBounds {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

/// Inclusive/exclusive bounds for the date field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DateBounds {
    pub gt: Option<NaiveDate>,
    pub gte: Option<NaiveDate>,
    pub lt: Option<NaiveDate>,
    pub lte: Option<NaiveDate>,
}

/// Range bounds, typed by the field they apply to.
#[derive(Clone, Debug, PartialEq)]
pub enum RangeBounds {
    Number(NumberBounds),
    Date(DateBounds),
}

/// One predicate applied to one field.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Exact match against a literal.
    Equals(Literal),
    /// Comparison bounds (`$gt`, `$gte`, `$lt`, `$lte`).
    Range(RangeBounds),
    /// Case-insensitive substring/prefix/suffix match (`$regex`).
    Pattern(Pattern),
    /// Membership in an enumerated list (`$in`).
    MemberOf(Vec<Literal>),
}

/// A validated, non-empty conjunction of field predicates.
///
/// Construction goes through [`FilterExpression::from_query_value`], which
/// enforces the closed field/operator vocabulary and the non-empty
/// invariant, so downstream code never sees a match-everything filter.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterExpression {
    clauses: BTreeMap<Field, Predicate>,
}

impl FilterExpression {
    /// Strictly parses the `query` object produced by the model.
    ///
    /// # Errors
    /// Any deviation from the taught grammar is rejected; see [`FilterError`].
    pub fn from_query_value(value: &Value) -> Result<Self, FilterError> {
        let obj = value.as_object().ok_or(FilterError::NotAnObject)?;
        if obj.is_empty() {
            return Err(FilterError::Empty);
        }

        let mut clauses = BTreeMap::new();
        for (key, spec) in obj {
            let field =
                Field::parse(key).ok_or_else(|| FilterError::UnknownField(key.clone()))?;
            clauses.insert(field, parse_predicate(field, spec)?);
        }
        Ok(Self { clauses })
    }

    /// The parsed clauses, ordered by field.
    pub fn clauses(&self) -> impl Iterator<Item = (&Field, &Predicate)> {
        self.clauses.iter()
    }

    /// Number of clauses; never zero for a constructed expression.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True iff every clause holds for the record (conjunction).
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.clauses
            .iter()
            .all(|(field, pred)| eval(pred, field_value(record, *field)))
    }
}

/// Borrowed view of one record field, typed like the filter literals.
enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
    Date(NaiveDate),
}

fn field_value(record: &StudentRecord, field: Field) -> FieldValue<'_> {
    match field {
        Field::Name => FieldValue::Text(&record.name),
        Field::RollNo => FieldValue::Number(i64::from(record.roll_no)),
        Field::Email => FieldValue::Text(&record.email),
        Field::PhoneNo => FieldValue::Number(record.phone_no),
        Field::Address => FieldValue::Text(&record.address),
        Field::Dob => FieldValue::Date(record.dob),
        Field::Class => FieldValue::Text(&record.class),
        Field::Status => FieldValue::Text(&record.status),
    }
}

fn eval(pred: &Predicate, value: FieldValue<'_>) -> bool {
    match pred {
        Predicate::Equals(lit) => literal_eq(lit, &value),
        Predicate::MemberOf(list) => list.iter().any(|lit| literal_eq(lit, &value)),
        Predicate::Pattern(pat) => match value {
            FieldValue::Text(s) => pattern_matches(pat, s),
            // Parsing guarantees patterns only target text fields.
            _ => false,
        },
        Predicate::Range(bounds) => match (bounds, value) {
            (RangeBounds::Number(b), FieldValue::Number(n)) => number_in_bounds(n as f64, b),
            (RangeBounds::Date(b), FieldValue::Date(d)) => date_in_bounds(d, b),
            _ => false,
        },
    }
}

fn literal_eq(lit: &Literal, value: &FieldValue<'_>) -> bool {
    match (lit, value) {
        (Literal::Text(a), FieldValue::Text(b)) => a == b,
        (Literal::Number(a), FieldValue::Number(b)) => a == b,
        (Literal::Date(a), FieldValue::Date(b)) => a == b,
        _ => false,
    }
}

fn pattern_matches(pat: &Pattern, value: &str) -> bool {
    let haystack = value.to_lowercase();
    match pat.anchor {
        Anchor::Anywhere => haystack.contains(&pat.needle),
        Anchor::Start => haystack.starts_with(&pat.needle),
        Anchor::End => haystack.ends_with(&pat.needle),
        Anchor::Exact => haystack == pat.needle,
    }
}

fn number_in_bounds(n: f64, b: &NumberBounds) -> bool {
    b.gt.is_none_or(|v| n > v)
        && b.gte.is_none_or(|v| n >= v)
        && b.lt.is_none_or(|v| n < v)
        && b.lte.is_none_or(|v| n <= v)
}

fn date_in_bounds(d: NaiveDate, b: &DateBounds) -> bool {
    b.gt.is_none_or(|v| d > v)
        && b.gte.is_none_or(|v| d >= v)
        && b.lt.is_none_or(|v| d < v)
        && b.lte.is_none_or(|v| d <= v)
}

/* ==========================
Strict parsing
========================== */

const RANGE_OPS: [&str; 4] = ["$gt", "$gte", "$lt", "$lte"];

fn parse_predicate(field: Field, spec: &Value) -> Result<Predicate, FilterError> {
    match spec {
        Value::Object(map) => {
            if map.is_empty() {
                return Err(FilterError::UnsupportedOperator {
                    field: field.as_str(),
                    op: "{}".into(),
                });
            }
            if map.contains_key("$regex") {
                return parse_pattern(field, map);
            }
            if map.contains_key("$in") {
                return parse_member_of(field, map);
            }
            if map.keys().any(|k| RANGE_OPS.contains(&k.as_str())) {
                return parse_range(field, map);
            }
            // First unrecognized key drives the error message.
            let op = map.keys().next().cloned().unwrap_or_default();
            Err(FilterError::UnsupportedOperator {
                field: field.as_str(),
                op,
            })
        }
        // Bare literal means exact match.
        _ => Ok(Predicate::Equals(parse_literal(field, spec)?)),
    }
}

fn parse_literal(field: Field, value: &Value) -> Result<Literal, FilterError> {
    match field.kind() {
        FieldKind::Text => value
            .as_str()
            .map(|s| Literal::Text(s.to_string()))
            .ok_or(FilterError::TypeMismatch {
                field: field.as_str(),
                expected: "string",
            }),
        FieldKind::Number => value
            .as_i64()
            .map(Literal::Number)
            .ok_or(FilterError::TypeMismatch {
                field: field.as_str(),
                expected: "integer",
            }),
        FieldKind::Date => {
            let s = value.as_str().ok_or(FilterError::TypeMismatch {
                field: field.as_str(),
                expected: "date string (YYYY-MM-DD)",
            })?;
            parse_date(s).map(Literal::Date)
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| FilterError::InvalidDate(s.to_string()))
}

fn parse_pattern(
    field: Field,
    map: &serde_json::Map<String, Value>,
) -> Result<Predicate, FilterError> {
    if field.kind() != FieldKind::Text {
        return Err(FilterError::UnsupportedOperator {
            field: field.as_str(),
            op: "$regex".into(),
        });
    }
    for key in map.keys() {
        if key != "$regex" && key != "$options" {
            return Err(FilterError::UnsupportedOperator {
                field: field.as_str(),
                op: key.clone(),
            });
        }
    }

    let raw = map
        .get("$regex")
        .and_then(Value::as_str)
        .ok_or(FilterError::TypeMismatch {
            field: field.as_str(),
            expected: "string pattern",
        })?;

    let starts = raw.starts_with('^');
    let ends = raw.ends_with('$') && raw.len() > usize::from(starts);
    let inner = &raw[usize::from(starts)..raw.len() - usize::from(ends)];

    if inner.is_empty() {
        return Err(FilterError::UnsupportedPattern(raw.to_string()));
    }
    // Only anchored literal text is supported; anything that would need a
    // real regex engine is rejected. `.` is allowed and matched literally
    // (emails, addresses).
    if inner.chars().any(|c| "*+?()[]{}|\\^$".contains(c)) {
        return Err(FilterError::UnsupportedPattern(raw.to_string()));
    }

    let anchor = match (starts, ends) {
        (false, false) => Anchor::Anywhere,
        (true, false) => Anchor::Start,
        (false, true) => Anchor::End,
        (true, true) => Anchor::Exact,
    };

    Ok(Predicate::Pattern(Pattern {
        needle: inner.to_lowercase(),
        anchor,
    }))
}

fn parse_member_of(
    field: Field,
    map: &serde_json::Map<String, Value>,
) -> Result<Predicate, FilterError> {
    for key in map.keys() {
        if key != "$in" {
            return Err(FilterError::UnsupportedOperator {
                field: field.as_str(),
                op: key.clone(),
            });
        }
    }
    let items = map
        .get("$in")
        .and_then(Value::as_array)
        .ok_or(FilterError::TypeMismatch {
            field: field.as_str(),
            expected: "array",
        })?;
    if items.is_empty() {
        return Err(FilterError::EmptyList(field.as_str()));
    }
    let literals = items
        .iter()
        .map(|v| parse_literal(field, v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Predicate::MemberOf(literals))
}

fn parse_range(
    field: Field,
    map: &serde_json::Map<String, Value>,
) -> Result<Predicate, FilterError> {
    for key in map.keys() {
        if !RANGE_OPS.contains(&key.as_str()) {
            return Err(FilterError::UnsupportedOperator {
                field: field.as_str(),
                op: key.clone(),
            });
        }
    }

    match field.kind() {
        FieldKind::Number => {
            let mut b = NumberBounds::default();
            for (key, value) in map {
                let n = value.as_f64().ok_or(FilterError::TypeMismatch {
                    field: field.as_str(),
                    expected: "number",
                })?;
                match key.as_str() {
                    "$gt" => b.gt = Some(n),
                    "$gte" => b.gte = Some(n),
                    "$lt" => b.lt = Some(n),
                    _ => b.lte = Some(n),
                }
            }
            Ok(Predicate::Range(RangeBounds::Number(b)))
        }
        FieldKind::Date => {
            let mut b = DateBounds::default();
            for (key, value) in map {
                let s = value.as_str().ok_or(FilterError::TypeMismatch {
                    field: field.as_str(),
                    expected: "date string (YYYY-MM-DD)",
                })?;
                let d = parse_date(s)?;
                match key.as_str() {
                    "$gt" => b.gt = Some(d),
                    "$gte" => b.gte = Some(d),
                    "$lt" => b.lt = Some(d),
                    _ => b.lte = Some(d),
                }
            }
            Ok(Predicate::Range(RangeBounds::Date(b)))
        }
        FieldKind::Text => Err(FilterError::UnsupportedOperator {
            field: field.as_str(),
            op: "range".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> StudentRecord {
        StudentRecord {
            name: "Neha Bhatt".into(),
            roll_no: 6250,
            email: "neha.bhatt8b@example.com".into(),
            phone_no: 9380005468,
            address: "12 Rajpur Road, Dehradun".into(),
            dob: NaiveDate::from_ymd_opt(2010, 7, 12).unwrap(),
            class: "8B".into(),
            status: "active".into(),
        }
    }

    #[test]
    fn literal_parses_to_equals() {
        let f = FilterExpression::from_query_value(&json!({"roll_no": 6250})).unwrap();
        assert_eq!(f.len(), 1);
        let (field, pred) = f.clauses().next().unwrap();
        assert_eq!(*field, Field::RollNo);
        assert_eq!(*pred, Predicate::Equals(Literal::Number(6250)));
        assert!(f.matches(&record()));
    }

    #[test]
    fn empty_object_is_rejected() {
        assert_eq!(
            FilterExpression::from_query_value(&json!({})),
            Err(FilterError::Empty)
        );
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            FilterExpression::from_query_value(&json!("status = active")),
            Err(FilterError::NotAnObject)
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = FilterExpression::from_query_value(&json!({"grade": "A"})).unwrap_err();
        assert_eq!(err, FilterError::UnknownField("grade".into()));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err =
            FilterExpression::from_query_value(&json!({"name": {"$where": "1"}})).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));
    }

    #[test]
    fn range_on_text_field_is_rejected() {
        let err =
            FilterExpression::from_query_value(&json!({"name": {"$gte": "A"}})).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));
    }

    #[test]
    fn regex_on_number_field_is_rejected() {
        let err = FilterExpression::from_query_value(&json!({"phone_no": {"$regex": "^93"}}))
            .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));
    }

    #[test]
    fn string_literal_on_number_field_is_rejected() {
        let err = FilterExpression::from_query_value(&json!({"roll_no": "6250"})).unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { .. }));
    }

    #[test]
    fn numeric_range_matches() {
        let f = FilterExpression::from_query_value(
            &json!({"roll_no": {"$gte": 1000, "$lte": 7000}}),
        )
        .unwrap();
        assert!(f.matches(&record()));

        let f = FilterExpression::from_query_value(&json!({"roll_no": {"$gt": 6250}})).unwrap();
        assert!(!f.matches(&record()));
    }

    #[test]
    fn date_range_matches() {
        let f = FilterExpression::from_query_value(
            &json!({"dob": {"$gte": "2010-01-01", "$lt": "2011-01-01"}}),
        )
        .unwrap();
        assert!(f.matches(&record()));

        let f =
            FilterExpression::from_query_value(&json!({"dob": {"$gt": "2010-12-31"}})).unwrap();
        assert!(!f.matches(&record()));
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = FilterExpression::from_query_value(&json!({"dob": {"$gte": "2010-13-01"}}))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidDate(_)));
    }

    #[test]
    fn substring_pattern_is_case_insensitive() {
        let f = FilterExpression::from_query_value(
            &json!({"name": {"$regex": "bhatt", "$options": "i"}}),
        )
        .unwrap();
        assert!(f.matches(&record()));
    }

    #[test]
    fn prefix_and_suffix_anchors() {
        let f =
            FilterExpression::from_query_value(&json!({"name": {"$regex": "^neha"}})).unwrap();
        assert!(f.matches(&record()));

        let f = FilterExpression::from_query_value(
            &json!({"email": {"$regex": "@example.com$"}}),
        )
        .unwrap();
        assert!(f.matches(&record()));

        let f =
            FilterExpression::from_query_value(&json!({"class": {"$regex": "^8b$"}})).unwrap();
        assert!(f.matches(&record()));
    }

    #[test]
    fn regex_metacharacters_are_rejected() {
        let err = FilterExpression::from_query_value(
            &json!({"class": {"$regex": "^(9|10|11|12)"}}),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedPattern(_)));
    }

    #[test]
    fn member_of_matches() {
        let f = FilterExpression::from_query_value(
            &json!({"status": {"$in": ["inactive", "active"]}}),
        )
        .unwrap();
        assert!(f.matches(&record()));

        let f =
            FilterExpression::from_query_value(&json!({"class": {"$in": ["10A", "10B"]}}))
                .unwrap();
        assert!(!f.matches(&record()));
    }

    #[test]
    fn empty_in_list_is_rejected() {
        let err =
            FilterExpression::from_query_value(&json!({"status": {"$in": []}})).unwrap_err();
        assert_eq!(err, FilterError::EmptyList("status"));
    }

    #[test]
    fn conjunction_requires_all_clauses() {
        let f = FilterExpression::from_query_value(
            &json!({"status": "active", "class": "8B"}),
        )
        .unwrap();
        assert!(f.matches(&record()));

        let f = FilterExpression::from_query_value(
            &json!({"status": "active", "class": "9A"}),
        )
        .unwrap();
        assert!(!f.matches(&record()));
    }
}
