//! Core traits defining CHAINKV interfaces
//! 
//! These traits are the seams between the host, the state stores and the
//! handler.

use crate::error::{ChaincodeError, StateError};
use crate::types::{Response, StateVersion};

/// Result type for state store operations
pub type StateResult<T> = Result<T, StateError>;

/// Result type for handler operations
pub type ChaincodeResult<T> = Result<T, ChaincodeError>;

/// Read access to committed state
pub trait StateProvider: Send + Sync {
    /// Get the current state version
    fn version(&self) -> StateVersion;
    
    /// Get a value by key
    fn get(&self, key: &[u8]) -> StateResult<Option<Vec<u8>>>;
    
    /// Check if a key exists
    fn exists(&self, key: &[u8]) -> StateResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Write access to committed state
pub trait StateMutator: StateProvider {
    /// Set a value
    fn set(&self, key: &[u8], value: &[u8]) -> StateResult<()>;
    
    /// Delete a key
    fn delete(&self, key: &[u8]) -> StateResult<()>;
    
    /// Apply a batch of changes atomically
    fn apply_batch(&self, changes: Vec<StateChange>) -> StateResult<StateVersion>;
}

/// State change operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Set { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

/// The handler's view of one transaction
///
/// A stub is created by the host for exactly one invocation. All state
/// access goes through it, so nothing the handler touches outlives the
/// transaction.
pub trait ChaincodeStub {
    /// Transaction identifier, for diagnostics
    fn tx_id(&self) -> &str;

    /// Every argument as delivered, function name included
    fn string_args(&self) -> &[String];

    /// Function name and ordered string parameters of this invocation
    fn function_and_parameters(&self) -> (&str, &[String]);

    /// Read a value; `Ok(None)` means the key has no value
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Record a write for this transaction
    fn put_state(&mut self, key: &str, value: &[u8]) -> StateResult<()>;
}

/// A state-transition handler loaded by the host
pub trait Chaincode: Send + Sync {
    /// Called once when the handler is deployed
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// Called for every transaction
    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}
