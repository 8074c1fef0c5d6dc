//! In-memory state store for testing and local runs

use chainkv_core::{
    StateChange, StateMutator, StateProvider, StateResult, StateVersion,
};
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::store::{sort_entries, StateEntry, StateStore};

/// In-memory state store
pub struct MemoryStateStore {
    data: DashMap<Vec<u8>, Vec<u8>>,
    version: RwLock<StateVersion>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            version: RwLock::new(StateVersion::new(0)),
        }
    }

    pub fn with_data(data: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
        let store = Self::new();
        for (key, value) in data {
            store.data.insert(key, value);
        }
        store
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStateStore {
    fn clone(&self) -> Self {
        let new_store = Self::new();
        for entry in self.data.iter() {
            new_store.data.insert(entry.key().clone(), entry.value().clone());
        }
        *new_store.version.write() = *self.version.read();
        new_store
    }
}

impl StateProvider for MemoryStateStore {
    fn version(&self) -> StateVersion {
        *self.version.read()
    }

    fn get(&self, key: &[u8]) -> StateResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    fn exists(&self, key: &[u8]) -> StateResult<bool> {
        Ok(self.data.contains_key(key))
    }
}

impl StateMutator for MemoryStateStore {
    fn set(&self, key: &[u8], value: &[u8]) -> StateResult<()> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StateResult<()> {
        self.data.remove(key);
        Ok(())
    }

    fn apply_batch(&self, changes: Vec<StateChange>) -> StateResult<StateVersion> {
        let mut version = self.version.write();

        for change in changes {
            match change {
                StateChange::Set { key, value } => {
                    self.data.insert(key, value);
                }
                StateChange::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }

        *version = version.next();
        Ok(*version)
    }
}

impl StateStore for MemoryStateStore {
    fn all_entries(&self) -> StateResult<Vec<StateEntry>> {
        let entries: Vec<StateEntry> = self
            .data
            .iter()
            .map(|entry| StateEntry {
                key: entry.key().clone(),
                value: entry.value().clone(),
            })
            .collect();
        Ok(sort_entries(entries))
    }

    fn len(&self) -> StateResult<usize> {
        Ok(self.data.len())
    }
}
