//! Browser LocalStorage store

use super::{PersistError, PersistedState, Store};
use crate::consts::STORAGE_KEY;

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

impl Store for LocalStorageStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => Ok(PersistedState::from_json(&json)),
            Ok(None) => Ok(None),
            Err(_) => Err(PersistError::Io("getItem failed".into())),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        let json = state.to_json()?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|_| PersistError::Io("setItem failed".into()))
    }
}
