//! Core types for CHAINKV
//!
//! Defines the invocation and response shapes exchanged with the host,
//! plus the key and version types used by the state stores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StateError;

/// A validated state key
///
/// Keys are non-empty strings. The host rejects empty keys on write, and
/// the reference stores do the same.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StateError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StateError::InvalidKey("key must not be an empty string".to_string()));
        }
        Ok(StateKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey({:?})", self.0)
    }
}

/// State version (incremented once per committed write set)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct StateVersion(pub u64);

impl StateVersion {
    pub fn new(value: u64) -> Self {
        StateVersion(value)
    }

    pub fn next(&self) -> StateVersion {
        StateVersion(self.0 + 1)
    }
}

impl fmt::Display for StateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One invocation delivered by the host
///
/// Holds the host's flat argument vector: the function name first, then
/// its parameters. The JSON form matches the request files accepted by
/// the CLI: `{ "fcn": "write", "args": ["color", "blue"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequestFile", into = "RequestFile")]
pub struct InvocationRequest {
    pub tx_id: String,
    args: Vec<String>,
}

impl InvocationRequest {
    pub fn new(
        tx_id: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        let mut flat = Vec::with_capacity(args.len() + 1);
        flat.push(function.into());
        flat.extend(args);
        Self::from_args(tx_id, flat)
    }

    /// Wrap a flat host argument vector as delivered.
    ///
    /// An empty vector has an empty function name, which no router
    /// recognizes.
    pub fn from_args(tx_id: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            args,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn function(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn parameters(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Every argument, function name included
    pub fn string_args(&self) -> &[String] {
        &self.args
    }
}

/// On-disk request file shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequestFile {
    #[serde(rename = "txId", default)]
    tx_id: String,

    fcn: String,

    #[serde(default, deserialize_with = "stringify_args")]
    args: Vec<String>,
}

/// Strings are taken as-is; any other JSON value is passed on as its
/// compact JSON text.
fn stringify_args<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

impl From<RequestFile> for InvocationRequest {
    fn from(file: RequestFile) -> Self {
        InvocationRequest::new(file.tx_id, file.fcn, file.args)
    }
}

impl From<InvocationRequest> for RequestFile {
    fn from(request: InvocationRequest) -> Self {
        RequestFile {
            fcn: request.function().to_string(),
            args: request.parameters().to_vec(),
            tx_id: request.tx_id,
        }
    }
}

/// Response returned to the host
///
/// Exactly one of `payload` (status `OK`) or `message` (status `ERROR`)
/// is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub const OK: i32 = 200;
    /// Statuses at or above this value are errors
    pub const ERROR_THRESHOLD: i32 = 400;
    pub const ERROR: i32 = 500;

    pub fn is_success(&self) -> bool {
        self.status < Self::ERROR_THRESHOLD
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// The invocation result: payload bytes or error message
    pub fn into_result(self) -> Result<Vec<u8>, String> {
        if self.is_success() {
            Ok(self.payload)
        } else {
            Err(self.message)
        }
    }
}
