use dosesafe_core::{ScanRecord, ScanType};
use dosesafe_store::{FileStore, Paths};
use serde_json::json;

pub fn temp_store() -> (tempfile::TempDir, FileStore) {
    let temp = tempfile::TempDir::new().unwrap();
    let store = FileStore::new(Paths::with_root(temp.path()));
    (temp, store)
}

pub fn sample_record(id: &str, medications: &[&str], interactions: usize) -> ScanRecord {
    let mut record = ScanRecord::new(ScanType::Manual);
    record.id = id.to_string();
    record.medications = medications.iter().map(|m| json!({ "name": m })).collect();
    record.interactions = (0..interactions)
        .map(|i| json!({ "severity": "moderate", "index": i }))
        .collect();
    record
}
