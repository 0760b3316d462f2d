//! Core data model: the stored student document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical student document, stored as JSON keyed by `roll_no`.
///
/// The query pipeline only reads these; writes happen through the seeding
/// path. `status` is an open, enumeration-like string ("active",
/// "inactive", "graduated", ...), matching the source data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub roll_no: u32,
    pub email: String,
    pub phone_no: i64,
    pub address: String,
    /// Date of birth, serialized as `YYYY-MM-DD`.
    pub dob: NaiveDate,
    pub class: String,
    pub status: String,
}
