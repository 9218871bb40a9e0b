//! Best-effort save/load of the player's bet and balance
//!
//! The in-memory economy is authoritative. Stores may fail at any time and
//! callers log and carry on; a missing or malformed record simply means the
//! engine starts from its defaults.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The persisted record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub bet: f64,
    pub balance: f64,
}

impl PersistedState {
    /// Parse a stored record; anything unusable reads as "nothing stored"
    pub fn from_json(json: &str) -> Option<Self> {
        let state: Self = serde_json::from_str(json).ok()?;
        state.is_usable().then_some(state)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(|e| PersistError::Encode(e.to_string()))
    }

    /// Finite numbers, positive bet, non-negative balance
    pub fn is_usable(&self) -> bool {
        self.bet.is_finite() && self.bet > 0.0 && self.balance.is_finite() && self.balance >= 0.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage io: {0}")]
    Io(String),
    #[error("encode: {0}")]
    Encode(String),
}

/// Persistence gateway
pub trait Store: Debug {
    /// `Ok(None)` when nothing usable is stored
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;
    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    record: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw record (may be malformed on purpose)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().record = Some(raw.into());
        store
    }

    pub fn with_state(state: PersistedState) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().record = state.to_json().ok();
        store
    }

    /// Make every subsequent save fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Last successfully saved record
    pub fn stored(&self) -> Option<PersistedState> {
        self.inner
            .borrow()
            .record
            .as_deref()
            .and_then(PersistedState::from_json)
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        Ok(self
            .inner
            .borrow()
            .record
            .as_deref()
            .and_then(PersistedState::from_json))
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(PersistError::Unavailable);
        }
        inner.record = Some(state.to_json()?);
        inner.writes += 1;
        Ok(())
    }
}

/// Load a record, logging and discarding any failure
pub fn load_or_none(store: &dyn Store) -> Option<PersistedState> {
    match store.load() {
        Ok(Some(state)) => {
            log::info!(
                "Loaded saved state (bet {:.2}, balance {:.2})",
                state.bet,
                state.balance
            );
            Some(state)
        }
        Ok(None) => {
            log::info!("No saved state, using defaults");
            None
        }
        Err(e) => {
            log::warn!("Failed to load saved state: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_records_read_as_none() {
        assert_eq!(PersistedState::from_json("garbage"), None);
        assert_eq!(PersistedState::from_json(r#"{"bet": "2"}"#), None);
        assert_eq!(PersistedState::from_json(r#"{"bet": 2.0}"#), None);
        assert_eq!(
            PersistedState::from_json(r#"{"bet": 2.0, "balance": -1.0}"#),
            None
        );
        assert_eq!(
            PersistedState::from_json(r#"{"bet": 2.0, "balance": 50.5}"#),
            Some(PersistedState {
                bet: 2.0,
                balance: 50.5
            })
        );
    }

    #[test]
    fn test_memory_store_roundtrip_and_failures() {
        let mut store = MemoryStore::new();
        let handle = store.clone();
        assert_eq!(store.load(), Ok(None));

        let state = PersistedState {
            bet: 3.0,
            balance: 42.0,
        };
        store.save(&state).unwrap();
        assert_eq!(handle.stored(), Some(state));
        assert_eq!(handle.writes(), 1);

        handle.set_fail_writes(true);
        assert_eq!(
            store.save(&PersistedState {
                bet: 1.0,
                balance: 1.0
            }),
            Err(PersistError::Unavailable)
        );
        assert_eq!(handle.stored(), Some(state));
    }

    #[test]
    fn test_load_or_none_swallows_bad_records() {
        let store = MemoryStore::with_raw("{not json");
        assert_eq!(load_or_none(&store), None);
    }
}
