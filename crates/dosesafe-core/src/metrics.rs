//! Display counters derived from the scan history

use dosesafe_store::{read_json, Store, StorageKey};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::history::decode_records;
use crate::ScanRecord;

/// Scans per person counted as helped
const SCANS_PER_PERSON: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub scans: usize,
    pub medications: usize,
    pub interactions: usize,
    pub people_helped: usize,
}

impl Metrics {
    pub fn from_records(records: &[ScanRecord]) -> Self {
        let scans = records.len();
        Self {
            scans,
            medications: records.iter().map(|r| r.medications.len()).sum(),
            interactions: records.iter().map(|r| r.interactions.len()).sum(),
            people_helped: people_helped(scans),
        }
    }
}

/// `max(1, scans / 5)`, or zero with no scans
pub fn people_helped(scans: usize) -> usize {
    if scans == 0 {
        0
    } else {
        (scans / SCANS_PER_PERSON).max(1)
    }
}

/// Keeps metrics in step with the stored history by recomputing from scratch
pub struct MetricsTracker<S> {
    store: S,
    metrics: Metrics,
}

impl<S: Store> MetricsTracker<S> {
    pub fn new(store: S) -> Self {
        let mut tracker = Self {
            store,
            metrics: Metrics::default(),
        };
        tracker.refresh();
        tracker
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Recompute from the stored history. Unreadable history resets to zero.
    pub fn refresh(&mut self) -> Metrics {
        self.metrics = match read_json::<Value, _>(&self.store, StorageKey::ScanHistory) {
            Ok(Some(history)) => Metrics::from_records(&decode_records(history)),
            Ok(None) => Metrics::default(),
            Err(e) => {
                error!("error reading scan history for metrics: {e}");
                Metrics::default()
            }
        };
        self.metrics
    }

    /// Storage-change notification; only history changes trigger a recompute.
    /// Returns whether metrics were refreshed.
    pub fn on_storage_change(&mut self, key: StorageKey) -> bool {
        if key != StorageKey::ScanHistory {
            return false;
        }
        self.refresh();
        true
    }
}
