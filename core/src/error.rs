//! Error types for CHAINKV

use thiserror::Error;

/// Errors reported by a state store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The backend failed for a reason unrelated to key absence.
    /// The message is the backend's own, unmodified.
    #[error("{0}")]
    Backend(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Main error type for the CHAINKV handler
///
/// Every variant is converted into an error response at the point of
/// detection; none of them ever escapes to the host as a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChaincodeError {
    // ============ Invocation Errors ============
    #[error("Incorrect number of arguments. Expecting {expected}: {params}, got {got}")]
    ArgumentCount {
        expected: usize,
        got: usize,
        params: &'static str,
    },

    #[error("Received unknown function invocation: {0}")]
    UnknownFunction(String),

    // ============ State Errors ============
    #[error("{operation} failed: {source}")]
    StateStore {
        operation: &'static str,
        #[source]
        source: StateError,
    },

    #[error("No value found for key '{0}'")]
    KeyNotFound(String),

    // ============ Configuration Errors ============
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChaincodeError {
    pub fn argument_count(expected: usize, got: usize, params: &'static str) -> Self {
        ChaincodeError::ArgumentCount {
            expected,
            got,
            params,
        }
    }

    pub fn reading(source: StateError) -> Self {
        ChaincodeError::StateStore {
            operation: "reading",
            source,
        }
    }

    pub fn writing(source: StateError) -> Self {
        ChaincodeError::StateStore {
            operation: "writing",
            source,
        }
    }
}

impl From<serde_json::Error> for ChaincodeError {
    fn from(err: serde_json::Error) -> Self {
        ChaincodeError::Config(err.to_string())
    }
}
