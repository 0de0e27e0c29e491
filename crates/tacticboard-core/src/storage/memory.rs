//! Process-local roster store.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::roster::RosterFile;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keeps each roster as the same JSON document [`super::FileStorage`] would
/// write, so a round trip through it exercises the persisted record format.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.documents
            .read()
            .map_err(|_| StorageError::Other("roster store poisoned".to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.documents
            .write()
            .map_err(|_| StorageError::Other("roster store poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, roster: &RosterFile) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let json = roster.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            self.write()?.insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<RosterFile>> {
        let id = id.to_string();
        Box::pin(async move {
            let documents = self.read()?;
            let json = documents.get(&id).ok_or_else(|| StorageError::NotFound(id.clone()))?;
            RosterFile::from_json(json).map_err(|e| StorageError::Serialization(format!("{}: {}", id, e)))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            if self.write()?.remove(&id).is_none() {
                log::debug!("Nothing stored under {}", id);
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        // BTreeMap keys come out sorted.
        Box::pin(async move { Ok(self.read()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}
