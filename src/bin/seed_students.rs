//! Seeds the student store from a JSON array of records.
//!
//! Usage: `seed-students [path/to/students.json]`
//! Defaults to `data/students.sample.json`; the store location comes from
//! `STORE_PATH` (default `data/students.db`).

use anyhow::{Context, Result, bail};
use student_store::{StoreConfig, StudentRecord, StudentStore};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/students.sample.json".into());

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let records: Vec<StudentRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing records from {path}"))?;
    if records.is_empty() {
        bail!("{path} contains no records");
    }

    let store_path = std::env::var("STORE_PATH").unwrap_or_else(|_| "data/students.db".into());
    let store = StudentStore::open(&StoreConfig::new_default(&store_path))
        .with_context(|| format!("opening store at {store_path}"))?;

    let seeded = store.insert_many(&records)?;
    println!(
        "seeded {seeded} students from {path} ({} total in store)",
        store.count()
    );

    Ok(())
}
