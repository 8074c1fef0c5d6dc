//! Core state store traits and types

use chainkv_core::{StateMutator, StateResult};

/// A single committed key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl StateEntry {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Sort entries by key for deterministic output
pub fn sort_entries(mut entries: Vec<StateEntry>) -> Vec<StateEntry> {
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}

/// Abstract state store interface
pub trait StateStore: StateMutator {
    /// Get all entries, ordered by key
    fn all_entries(&self) -> StateResult<Vec<StateEntry>>;
    
    /// Number of keys with a value
    fn len(&self) -> StateResult<usize> {
        Ok(self.all_entries()?.len())
    }
    
    fn is_empty(&self) -> StateResult<bool> {
        Ok(self.len()? == 0)
    }
}
