//! Student record store: typed filters over an embedded document tree.
//!
//! This crate owns the query half of the lookup pipeline:
//! - the [`StudentRecord`] document model
//! - the [`FilterExpression`] query language (strictly parsed, see
//!   [`filter`])
//! - [`StudentStore`], a small facade over a sled tree of JSON documents
//!   that executes filters with a full scan
//!
//! Zero matches is a successful, empty result — distinct from any
//! [`StoreError`].

mod config;
mod errors;
pub mod filter;
mod record;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use filter::{FilterError, FilterExpression};
pub use record::StudentRecord;

use tracing::{debug, trace};

/// Facade over the embedded student collection.
///
/// Documents are stored as JSON values keyed by the big-endian `roll_no`,
/// so scans come back in roll-number order. Handles are cheap to clone and
/// safe to share across request handlers.
#[derive(Clone)]
pub struct StudentStore {
    #[allow(unused)]
    db: sled::Db,
    tree: sled::Tree,
}

impl StudentStore {
    /// Opens (or creates) the store at the configured path.
    ///
    /// # Errors
    /// Returns `StoreError::Config` for invalid config and
    /// `StoreError::Store` if sled cannot open the database.
    pub fn open(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;
        trace!("StudentStore::open path={:?}", cfg.path);
        let db = sled::open(&cfg.path)?;
        let tree = db.open_tree(cfg.collection.as_bytes())?;
        Ok(Self { db, tree })
    }

    /// Executes a filter and returns every matching record.
    ///
    /// An empty result is success; only store access or document decode
    /// problems are errors.
    pub fn find(&self, filter: &FilterExpression) -> Result<Vec<StudentRecord>, StoreError> {
        let mut out = Vec::new();
        for item in self.tree.iter() {
            let (_key, value) = item?;
            let record: StudentRecord = serde_json::from_slice(&value)?;
            if filter.matches(&record) {
                out.push(record);
            }
        }
        debug!(
            clauses = filter.len(),
            hits = out.len(),
            "StudentStore::find completed"
        );
        Ok(out)
    }

    /// Upserts a batch of records keyed by `roll_no` and flushes.
    ///
    /// Used by the seeding path and tests; the query pipeline never writes.
    pub fn insert_many(&self, records: &[StudentRecord]) -> Result<usize, StoreError> {
        for record in records {
            let key = record.roll_no.to_be_bytes();
            self.tree.insert(key, serde_json::to_vec(record)?)?;
        }
        self.tree.flush()?;
        debug!(count = records.len(), "StudentStore::insert_many flushed");
        Ok(records.len())
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.tree.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_records() -> Vec<StudentRecord> {
        vec![
            StudentRecord {
                name: "Neha Bhatt".into(),
                roll_no: 6250,
                email: "neha.bhatt8b@example.com".into(),
                phone_no: 9380005468,
                address: "12 Rajpur Road, Dehradun".into(),
                dob: NaiveDate::from_ymd_opt(2010, 7, 12).unwrap(),
                class: "8B".into(),
                status: "active".into(),
            },
            StudentRecord {
                name: "Arjun Kumar".into(),
                roll_no: 1042,
                email: "arjun.kumar@gmail.com".into(),
                phone_no: 9812004411,
                address: "5 MG Road, Mumbai".into(),
                dob: NaiveDate::from_ymd_opt(2008, 2, 3).unwrap(),
                class: "10A".into(),
                status: "active".into(),
            },
            StudentRecord {
                name: "Sara Iyer".into(),
                roll_no: 7310,
                email: "sara.iyer@example.com".into(),
                phone_no: 9933127755,
                address: "8 Brigade Road, Bengaluru".into(),
                dob: NaiveDate::from_ymd_opt(2006, 11, 21).unwrap(),
                class: "12C".into(),
                status: "graduated".into(),
            },
        ]
    }

    fn open_seeded() -> (tempfile::TempDir, StudentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = StudentStore::open(&StoreConfig::new_default(dir.path())).unwrap();
        store.insert_many(&sample_records()).unwrap();
        (dir, store)
    }

    fn filter(v: serde_json::Value) -> FilterExpression {
        FilterExpression::from_query_value(&v).unwrap()
    }

    #[test]
    fn insert_and_count_round_trip() {
        let (_dir, store) = open_seeded();
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn find_by_status_returns_matching_records() {
        let (_dir, store) = open_seeded();
        let hits = store.find(&filter(json!({"status": "active"}))).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.status == "active"));
    }

    #[test]
    fn zero_matches_is_success_with_empty_result() {
        let (_dir, store) = open_seeded();
        let hits = store.find(&filter(json!({"status": "expelled"}))).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn results_come_back_in_roll_number_order() {
        let (_dir, store) = open_seeded();
        let hits = store
            .find(&filter(json!({"roll_no": {"$gte": 0}})))
            .unwrap();
        let rolls: Vec<u32> = hits.iter().map(|r| r.roll_no).collect();
        assert_eq!(rolls, vec![1042, 6250, 7310]);
    }

    #[test]
    fn combined_clauses_narrow_the_result() {
        let (_dir, store) = open_seeded();
        let hits = store
            .find(&filter(json!({
                "status": "active",
                "address": {"$regex": "mumbai", "$options": "i"}
            })))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].roll_no, 1042);
    }

    #[test]
    fn upsert_replaces_existing_roll_no() {
        let (_dir, store) = open_seeded();
        let mut updated = sample_records().remove(0);
        updated.status = "inactive".into();
        store.insert_many(std::slice::from_ref(&updated)).unwrap();

        assert_eq!(store.count(), 3);
        let hits = store.find(&filter(json!({"roll_no": 6250}))).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, "inactive");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = StoreConfig {
            path: "".into(),
            collection: "students".into(),
        };
        assert!(matches!(
            StudentStore::open(&cfg),
            Err(StoreError::Config(_))
        ));
    }
}
