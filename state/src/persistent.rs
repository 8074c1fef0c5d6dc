//! Persistent state store using sled database

use chainkv_core::{
    StateChange, StateError, StateMutator, StateProvider, StateResult, StateVersion,
};
use parking_lot::RwLock;
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

use crate::store::{StateEntry, StateStore};

const STATE_TREE: &str = "state";
const META_TREE: &str = "meta";
const VERSION_KEY: &[u8] = b"version";

fn backend(err: sled::Error) -> StateError {
    StateError::Backend(err.to_string())
}

/// Persistent state store backed by sled database
pub struct PersistentStateStore {
    db: Db,
    state: Tree,
    meta: Tree,
    version: RwLock<StateVersion>,
}

impl PersistentStateStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StateResult<Self> {
        let db = sled::open(path).map_err(backend)?;
        let state = db.open_tree(STATE_TREE).map_err(backend)?;
        let meta = db.open_tree(META_TREE).map_err(backend)?;

        // Load version from disk or start at 0
        let version = match meta.get(VERSION_KEY).map_err(backend)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_ref().try_into().map_err(|_| {
                    StateError::Backend(format!("corrupt version record ({} bytes)", bytes.len()))
                })?;
                StateVersion::new(u64::from_le_bytes(raw))
            }
            None => StateVersion::new(0),
        };

        debug!("opened state store at {}", version);

        Ok(Self {
            db,
            state,
            meta,
            version: RwLock::new(version),
        })
    }
}

impl StateProvider for PersistentStateStore {
    fn version(&self) -> StateVersion {
        *self.version.read()
    }

    fn get(&self, key: &[u8]) -> StateResult<Option<Vec<u8>>> {
        self.state
            .get(key)
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(backend)
    }

    fn exists(&self, key: &[u8]) -> StateResult<bool> {
        self.state.contains_key(key).map_err(backend)
    }
}

impl StateMutator for PersistentStateStore {
    fn set(&self, key: &[u8], value: &[u8]) -> StateResult<()> {
        self.state.insert(key, value).map_err(backend)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StateResult<()> {
        self.state.remove(key).map_err(backend)?;
        Ok(())
    }

    fn apply_batch(&self, changes: Vec<StateChange>) -> StateResult<StateVersion> {
        let mut version = self.version.write();
        let new_version = version.next();

        // Create a batch for atomic writes
        let mut batch = sled::Batch::default();
        for change in changes {
            match change {
                StateChange::Set { key, value } => batch.insert(key, value),
                StateChange::Delete { key } => batch.remove(key),
            }
        }

        self.state.apply_batch(batch).map_err(backend)?;
        self.meta
            .insert(VERSION_KEY, &new_version.0.to_le_bytes())
            .map_err(backend)?;
        self.db.flush().map_err(backend)?;

        *version = new_version;
        Ok(new_version)
    }
}

impl StateStore for PersistentStateStore {
    fn all_entries(&self) -> StateResult<Vec<StateEntry>> {
        // sled iterates in key order
        self.state
            .iter()
            .map(|result| {
                result
                    .map(|(key, value)| StateEntry::new(key.to_vec(), value.to_vec()))
                    .map_err(backend)
            })
            .collect()
    }

    fn len(&self) -> StateResult<usize> {
        Ok(self.state.len())
    }
}
