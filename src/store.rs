// Durable slot storage for booking records
//
// Two named slots back the form: "lastBooking" holds the most recent
// record and "bookingHistory" holds the append-only submission sequence.
use crate::booking::BookingRecord;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

pub const LAST_BOOKING_SLOT: &str = "lastBooking";
pub const HISTORY_SLOT: &str = "bookingHistory";

// Current on-disk shape of the history slot. Bumped whenever the envelope
// layout changes; older shapes are upgraded on read where possible.
pub const HISTORY_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} bytes available")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored booking history is corrupt: {0}")]
    CorruptHistory(String),

    #[error("Stored booking history has unsupported version {0}")]
    UnsupportedVersion(u32),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// The durable key-value surface the form writes through. Implementations
// own their interior synchronization.
pub trait SlotStore: Send + Sync {
    // Read a slot; None when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    // Overwrite a slot unconditionally.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// In-memory backend. An optional byte capacity enforces a storage quota
// across all slots.
pub struct MemoryStore {
    slots: DashMap<String, String>,
    max_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            max_bytes: None,
        }
    }

    pub fn with_capacity(max_bytes: usize) -> Self {
        Self {
            slots: DashMap::new(),
            max_bytes: Some(max_bytes),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).map(|value| value.clone()))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.max_bytes {
            let replaced = self.slots.get(key).map_or(0, |v| v.len());
            let used: usize = self.slots.iter().map(|entry| entry.value().len()).sum();
            let needed = used - replaced + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// File backend: one JSON object per store, all slots inside. The mutex
// serializes the read-modify-write cycle of put.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SlotStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.read_slots()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string(&slots)?)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryEnvelope {
    version: u32,
    bookings: Vec<BookingRecord>,
}

// Persistence for booking records over any slot backend.
pub struct BookingStore<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> BookingStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    // Overwrite the most-recent-booking slot.
    pub fn save_latest(&self, record: &BookingRecord) -> Result<(), StoreError> {
        self.slots
            .put(LAST_BOOKING_SLOT, &serde_json::to_string(record)?)
    }

    // Most recent booking, or None when nothing was ever submitted. Read
    // by the summary view.
    pub fn load_latest(&self) -> Result<Option<BookingRecord>, StoreError> {
        match self.slots.get(LAST_BOOKING_SLOT)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    // Full submission history, oldest first. A missing slot is an empty
    // sequence; unreadable content is an error, never treated as empty.
    pub fn load_history(&self) -> Result<Vec<BookingRecord>, StoreError> {
        match self.slots.get(HISTORY_SLOT)? {
            Some(raw) => decode_history(&raw),
            None => Ok(Vec::new()),
        }
    }

    // Append one record, rewriting the whole envelope at the current
    // version (which also upgrades a legacy bare-array history).
    pub fn append_history(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let mut bookings = self.load_history()?;
        bookings.push(record.clone());
        self.write_history(bookings)
    }

    // One logical unit per submission: decode the existing history first,
    // then write the appended history, then overwrite lastBooking last.
    // Corrupt history or a quota failure on the larger history write is
    // detected before the lastBooking slot is touched.
    pub fn persist(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let mut bookings = self.load_history()?;
        bookings.push(record.clone());
        self.write_history(bookings)?;
        self.save_latest(record)?;
        debug!(
            hotel = %record.hotel,
            nights = record.nights,
            price = record.price,
            "persisted booking"
        );
        Ok(())
    }

    fn write_history(&self, bookings: Vec<BookingRecord>) -> Result<(), StoreError> {
        let envelope = HistoryEnvelope {
            version: HISTORY_VERSION,
            bookings,
        };
        self.slots
            .put(HISTORY_SLOT, &serde_json::to_string(&envelope)?)
    }
}

fn decode_history(raw: &str) -> Result<Vec<BookingRecord>, StoreError> {
    if let Ok(envelope) = serde_json::from_str::<HistoryEnvelope>(raw) {
        if envelope.version != HISTORY_VERSION {
            return Err(StoreError::UnsupportedVersion(envelope.version));
        }
        return Ok(envelope.bookings);
    }

    // Legacy shape: a bare array of records from before the envelope was
    // introduced. Upgraded to the current version on the next write.
    if let Ok(bookings) = serde_json::from_str::<Vec<BookingRecord>>(raw) {
        return Ok(bookings);
    }

    warn!("booking history slot failed to decode");
    Err(StoreError::CorruptHistory(
        "existing value is neither a versioned envelope nor a record array".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldInput;

    fn sample_record(hotel: &str) -> BookingRecord {
        BookingRecord::build(&FieldInput {
            fullname: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            hotel: hotel.to_string(),
            checkin: "2025-06-01".to_string(),
            checkout: "2025-06-04".to_string(),
            room: "Double".to_string(),
            guests: "2".to_string(),
            requests: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_latest_round_trip() {
        let store = BookingStore::new(MemoryStore::new());
        assert!(store.load_latest().unwrap().is_none());

        let record = sample_record("Grand Lodge");
        store.save_latest(&record).unwrap();
        assert_eq!(store.load_latest().unwrap().unwrap(), record);
    }

    #[test]
    fn test_history_preserves_submission_order() {
        let store = BookingStore::new(MemoryStore::new());
        for hotel in ["First", "Second", "Third"] {
            store.persist(&sample_record(hotel)).unwrap();
        }

        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter().map(|r| r.hotel.as_str()).collect::<Vec<_>>(),
            vec!["First", "Second", "Third"]
        );
        assert_eq!(store.load_latest().unwrap().unwrap().hotel, "Third");
    }

    #[test]
    fn test_missing_history_is_empty() {
        let store = BookingStore::new(MemoryStore::new());
        assert!(store.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_bare_array_is_upgraded() {
        let slots = MemoryStore::new();
        let legacy = serde_json::to_string(&vec![sample_record("Old Hotel")]).unwrap();
        slots.put(HISTORY_SLOT, &legacy).unwrap();

        let store = BookingStore::new(slots);
        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].hotel, "Old Hotel");

        // The next append rewrites the slot in the current envelope shape.
        store.append_history(&sample_record("New Hotel")).unwrap();
        let raw = store.slots.get(HISTORY_SLOT).unwrap().unwrap();
        let envelope: HistoryEnvelope = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope.version, HISTORY_VERSION);
        assert_eq!(envelope.bookings.len(), 2);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let slots = MemoryStore::new();
        slots
            .put(HISTORY_SLOT, r#"{"version":99,"bookings":[]}"#)
            .unwrap();

        let store = BookingStore::new(slots);
        assert!(matches!(
            store.load_history(),
            Err(StoreError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_corrupt_history_aborts_before_any_write() {
        let slots = MemoryStore::new();
        slots.put(HISTORY_SLOT, "definitely not json").unwrap();

        let store = BookingStore::new(slots);
        let err = store.persist(&sample_record("Grand Lodge")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptHistory(_)));

        // History is written before lastBooking, so the failed decode left
        // the latest slot untouched.
        assert!(store.load_latest().unwrap().is_none());
        assert_eq!(
            store.slots.get(HISTORY_SLOT).unwrap().unwrap(),
            "definitely not json"
        );
    }

    #[test]
    fn test_quota_failure_leaves_latest_untouched() {
        let store = BookingStore::new(MemoryStore::with_capacity(16));
        let err = store.persist(&sample_record("Grand Lodge")).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert!(store.load_latest().unwrap().is_none());
    }

    #[test]
    fn test_quota_allows_overwriting_a_slot() {
        let slots = MemoryStore::with_capacity(64);
        slots.put("slot", &"a".repeat(60)).unwrap();
        // Replacing a value only charges the difference, not the sum.
        slots.put("slot", &"b".repeat(60)).unwrap();
        assert!(slots.put("other", &"c".repeat(10)).is_err());
    }

    #[test]
    fn test_file_store_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        let record = sample_record("Grand Lodge");

        {
            let store = BookingStore::new(JsonFileStore::new(&path));
            store.persist(&record).unwrap();
        }

        let reopened = BookingStore::new(JsonFileStore::new(&path));
        assert_eq!(reopened.load_latest().unwrap().unwrap(), record);
        assert_eq!(reopened.load_history().unwrap(), vec![record]);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookingStore::new(JsonFileStore::new(dir.path().join("absent.json")));
        assert!(store.load_latest().unwrap().is_none());
        assert!(store.load_history().unwrap().is_empty());
    }
}
