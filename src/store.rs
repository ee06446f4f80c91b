use indexmap::IndexMap;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Ephemeral hand-off between capture and export.
///
/// Payloads are parked under a millisecond timestamp id and read back once:
/// [`PayloadStore::take`] clears the whole store.
#[derive(Debug, Default)]
pub struct PayloadStore {
    payloads: IndexMap<u64, Vec<Value>>,
}

impl PayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload and return its id
    pub fn put(&mut self, payload: Vec<Value>) -> u64 {
        let mut id = epoch_millis();
        while self.payloads.contains_key(&id) {
            id += 1;
        }
        self.payloads.insert(id, payload);
        id
    }

    /// Read a payload back, clearing the store
    pub fn take(&mut self, id: u64) -> Option<Vec<Value>> {
        let payload = self.payloads.shift_remove(&id);
        self.payloads.clear();
        payload
    }

    pub fn contains(&self, id: u64) -> bool {
        self.payloads.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
