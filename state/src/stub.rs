//! Per-transaction stub
//!
//! The host creates one `TransactionStub` per invocation. Reads go straight
//! to committed state; writes are buffered in the stub's write set and only
//! reach the store when the host commits. Dropping the stub discards them.

use chainkv_core::{
    ChaincodeStub, InvocationRequest, StateChange, StateKey, StateMutator, StateProvider,
    StateResult, StateVersion,
};
use std::collections::BTreeMap;
use tracing::debug;

pub struct TransactionStub<'a, S: StateProvider + ?Sized> {
    request: InvocationRequest,
    store: &'a S,
    writes: BTreeMap<StateKey, Vec<u8>>,
}

impl<'a, S: StateProvider + ?Sized> TransactionStub<'a, S> {
    pub fn new(request: InvocationRequest, store: &'a S) -> Self {
        Self {
            request,
            store,
            writes: BTreeMap::new(),
        }
    }

    /// Writes recorded so far, keyed by state key
    pub fn pending_writes(&self) -> &BTreeMap<StateKey, Vec<u8>> {
        &self.writes
    }

    /// Consume the stub, yielding the write set in key order
    pub fn into_write_set(self) -> Vec<StateChange> {
        self.writes
            .into_iter()
            .map(|(key, value)| StateChange::Set {
                key: key.as_bytes().to_vec(),
                value,
            })
            .collect()
    }
}

impl<'a, S: StateMutator + ?Sized> TransactionStub<'a, S> {
    /// Apply the write set to the backing store.
    ///
    /// A read-only transaction leaves the version unchanged.
    pub fn commit(self) -> StateResult<StateVersion> {
        let store = self.store;
        let tx_id = self.request.tx_id.clone();
        let changes = self.into_write_set();

        if changes.is_empty() {
            return Ok(store.version());
        }

        let count = changes.len();
        let version = store.apply_batch(changes)?;
        debug!(tx_id = %tx_id, writes = count, "committed write set at {}", version);
        Ok(version)
    }
}

impl<'a, S: StateProvider + ?Sized> ChaincodeStub for TransactionStub<'a, S> {
    fn tx_id(&self) -> &str {
        &self.request.tx_id
    }

    fn string_args(&self) -> &[String] {
        self.request.string_args()
    }

    fn function_and_parameters(&self) -> (&str, &[String]) {
        (self.request.function(), self.request.parameters())
    }

    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        let key = StateKey::new(key)?;
        self.store.get(key.as_bytes())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> StateResult<()> {
        let key = StateKey::new(key)?;
        self.writes.insert(key, value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStateStore;
    use chainkv_core::StateError;

    fn request(function: &str, args: &[&str]) -> InvocationRequest {
        InvocationRequest::new(
            "tx-test",
            function,
            args.iter().map(|a| a.to_string()).collect(),
        )
    }

    #[test]
    fn test_function_and_parameters() {
        let store = MemoryStateStore::new();
        let stub = TransactionStub::new(request("write", &["color", "blue"]), &store);

        let (function, params) = stub.function_and_parameters();
        assert_eq!(function, "write");
        assert_eq!(params, &["color".to_string(), "blue".to_string()]);
        assert_eq!(stub.tx_id(), "tx-test");
    }

    #[test]
    fn test_writes_are_buffered_until_commit() {
        let store = MemoryStateStore::new();
        let mut stub = TransactionStub::new(request("write", &[]), &store);

        stub.put_state("color", b"blue").unwrap();
        assert_eq!(stub.get_state("color").unwrap(), None);
        assert_eq!(store.get(b"color").unwrap(), None);

        let version = stub.commit().unwrap();
        assert_eq!(version, StateVersion::new(1));
        assert_eq!(store.get(b"color").unwrap(), Some(b"blue".to_vec()));
    }

    #[test]
    fn test_last_write_wins_within_transaction() {
        let store = MemoryStateStore::new();
        let mut stub = TransactionStub::new(request("write", &[]), &store);

        stub.put_state("color", b"blue").unwrap();
        stub.put_state("color", b"red").unwrap();

        let changes = stub.into_write_set();
        assert_eq!(
            changes,
            vec![StateChange::Set {
                key: b"color".to_vec(),
                value: b"red".to_vec(),
            }]
        );
    }

    #[test]
    fn test_dropped_stub_discards_writes() {
        let store = MemoryStateStore::new();
        {
            let mut stub = TransactionStub::new(request("write", &[]), &store);
            stub.put_state("color", b"blue").unwrap();
        }
        assert_eq!(store.get(b"color").unwrap(), None);
        assert_eq!(store.version(), StateVersion::new(0));
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = MemoryStateStore::new();
        let mut stub = TransactionStub::new(request("write", &[]), &store);

        assert!(matches!(stub.put_state("", b"x"), Err(StateError::InvalidKey(_))));
        assert!(matches!(stub.get_state(""), Err(StateError::InvalidKey(_))));
    }

    #[test]
    fn test_read_only_commit_keeps_version() {
        let store = MemoryStateStore::new();
        let stub = TransactionStub::new(request("read", &["color"]), &store);
        assert_eq!(stub.commit().unwrap(), StateVersion::new(0));
    }
}
