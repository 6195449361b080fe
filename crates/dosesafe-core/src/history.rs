//! Scan-history cache: newest first, capped, decoded record by record

use dosesafe_store::{read_json, write_json, Store, StorageKey, StoreError};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::{Error, Result, ScanRecord, ScanType};

/// Narrowing applied when browsing history. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive text found in a medication name, the condition, or
    /// the uploaded file name
    pub search: Option<String>,
    pub scan_type: Option<ScanType>,
    pub risk_level: Option<String>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.scan_type.is_none()
            && self.risk_level.is_none()
    }

    pub fn matches(&self, record: &ScanRecord) -> bool {
        if let Some(scan_type) = self.scan_type {
            if record.scan_type != scan_type {
                return false;
            }
        }
        if let Some(ref risk) = self.risk_level {
            if !record.risk_level.eq_ignore_ascii_case(risk) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                let found = |text: &str| text.to_lowercase().contains(&term);
                record.medication_names().iter().any(|name| found(name.as_str()))
                    || found(&record.patient_condition)
                    || record.file_name.as_deref().is_some_and(found)
            }
            _ => true,
        }
    }
}

pub struct ScanHistory<S> {
    store: S,
    limit: usize,
}

impl<S: Store> ScanHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(store: S, limit: usize) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Stored scans, newest first. Unreadable history reads as empty.
    pub fn read(&self) -> Vec<ScanRecord> {
        self.load().unwrap_or_else(|e| {
            error!("failed to read scan history: {e}");
            Vec::new()
        })
    }

    /// Prepend `record`, drop anything past the limit, and make it the
    /// latest scan
    pub fn save(&self, record: ScanRecord) -> Result<ScanRecord> {
        let mut history = self.load()?;
        history.insert(0, record.clone());
        history.truncate(self.limit);

        write_json(&self.store, StorageKey::ScanHistory, &history)?;
        self.set_latest(&record)?;
        debug!(id = %record.id, len = history.len(), "saved scan to history");
        Ok(record)
    }

    /// Remove every scan with `id`; returns the remaining history
    pub fn delete(&self, id: &str) -> Result<Vec<ScanRecord>> {
        let history: Vec<ScanRecord> = self
            .load()?
            .into_iter()
            .filter(|scan| scan.id != id)
            .collect();
        write_json(&self.store, StorageKey::ScanHistory, &history)?;
        Ok(history)
    }

    /// Stored scans passing `filter`, newest timestamp first
    pub fn search(&self, filter: &HistoryFilter) -> Vec<ScanRecord> {
        let mut found: Vec<ScanRecord> = self
            .read()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        found
    }

    pub fn get(&self, id: &str) -> Option<ScanRecord> {
        self.read().into_iter().find(|scan| scan.id == id)
    }

    /// Make a stored scan the one shown by the results view
    pub fn view(&self, id: &str) -> Result<ScanRecord> {
        let record = self
            .get(id)
            .ok_or_else(|| Error::ScanNotFound(id.to_string()))?;
        self.set_latest(&record)?;
        Ok(record)
    }

    pub fn clear(&self) -> Result<()> {
        Ok(self.store.remove(StorageKey::ScanHistory)?)
    }

    pub fn latest(&self) -> Option<ScanRecord> {
        match read_json(&self.store, StorageKey::LatestScan) {
            Ok(latest) => latest,
            Err(e) => {
                error!("failed to read latest scan: {e}");
                None
            }
        }
    }

    pub fn set_latest(&self, record: &ScanRecord) -> Result<()> {
        Ok(write_json(&self.store, StorageKey::LatestScan, record)?)
    }

    pub fn clear_latest(&self) -> Result<()> {
        Ok(self.store.remove(StorageKey::LatestScan)?)
    }

    /// Malformed JSON counts as empty; IO failures propagate so a save never
    /// overwrites history it could not read.
    fn load(&self) -> Result<Vec<ScanRecord>, StoreError> {
        match read_json::<Value, _>(&self.store, StorageKey::ScanHistory) {
            Ok(history) => Ok(history.map(decode_records).unwrap_or_default()),
            Err(StoreError::Malformed { source, .. }) => {
                error!("discarding malformed scan history: {source}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Decode a stored history list one record at a time. An entry that cannot
/// be read as a record is dropped; the rest survive.
pub(crate) fn decode_records(value: Value) -> Vec<ScanRecord> {
    let Value::Array(items) = value else {
        error!("scan history is not a list, ignoring it");
        return Vec::new();
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, "skipping unreadable scan record: {e}");
                None
            }
        })
        .collect()
}
