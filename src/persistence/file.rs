//! JSON file store for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{PersistError, PersistedState, Store};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(PersistedState::from_json(&json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Io(e.to_string())),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let json = state.to_json()?;
        // Write-then-rename
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| PersistError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| PersistError::Io(e.to_string()))
    }
}
