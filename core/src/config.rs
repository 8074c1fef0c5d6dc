//! Configuration types for CHAINKV

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ChaincodeError;

/// What a read returns when the key has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Success with an empty payload
    #[default]
    EmptyPayload,
    /// Error response with a `KeyNotFound` message
    NotFound,
}

/// Handler configuration
///
/// Deployed variants of the handler differ in the function names they
/// answer to and in how they treat a missing key, so both are explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Function names routed to the read operation
    pub read_functions: Vec<String>,

    /// Function names routed to the write operation
    pub write_functions: Vec<String>,

    /// Missing-key behavior of the read operation
    pub missing_key: MissingKeyPolicy,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::read_write()
    }
}

impl HandlerConfig {
    /// `read`/`write` vocabulary, missing keys read as empty
    pub fn read_write() -> Self {
        Self {
            read_functions: vec!["read".to_string()],
            write_functions: vec!["write".to_string()],
            missing_key: MissingKeyPolicy::EmptyPayload,
        }
    }

    /// `get`/`set` vocabulary, missing keys are an error
    pub fn get_set() -> Self {
        Self {
            read_functions: vec!["get".to_string()],
            write_functions: vec!["set".to_string()],
            missing_key: MissingKeyPolicy::NotFound,
        }
    }

    pub fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Check that every name is non-empty and maps to one operation only.
    pub fn validate(&self) -> Result<(), ChaincodeError> {
        if self.read_functions.is_empty() && self.write_functions.is_empty() {
            return Err(ChaincodeError::Config("no function names configured".to_string()));
        }

        let mut seen = HashSet::new();
        for name in self.read_functions.iter().chain(self.write_functions.iter()) {
            if name.is_empty() {
                return Err(ChaincodeError::Config("function name must not be empty".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ChaincodeError::Config(format!(
                    "function name '{}' is configured more than once",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ChaincodeError> {
        let config: HandlerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChaincodeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChaincodeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_read_write() {
        let config = HandlerConfig::default();
        assert_eq!(config.read_functions, vec!["read".to_string()]);
        assert_eq!(config.write_functions, vec!["write".to_string()]);
        assert_eq!(config.missing_key, MissingKeyPolicy::EmptyPayload);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_get_set_preset() {
        let config = HandlerConfig::get_set();
        assert_eq!(config.missing_key, MissingKeyPolicy::NotFound);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let config = HandlerConfig {
            read_functions: vec!["get".to_string()],
            write_functions: vec!["get".to_string()],
            missing_key: MissingKeyPolicy::EmptyPayload,
        };
        assert!(matches!(config.validate(), Err(ChaincodeError::Config(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let config = HandlerConfig {
            read_functions: vec![String::new()],
            ..HandlerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = HandlerConfig::from_json(r#"{"missing_key": "not_found"}"#).unwrap();
        assert_eq!(config.read_functions, vec!["read".to_string()]);
        assert_eq!(config.missing_key, MissingKeyPolicy::NotFound);

        let both = HandlerConfig::from_json(
            r#"{"read_functions": ["read", "get"], "write_functions": ["write", "set"]}"#,
        )
        .unwrap();
        assert_eq!(both.read_functions.len(), 2);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            HandlerConfig::from_json("{not json"),
            Err(ChaincodeError::Config(_))
        ));
    }
}
