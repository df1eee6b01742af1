//! Store configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default expiry for transient-stage records.
pub const DEFAULT_TRANSIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum number of entity ids per batch read.
pub const DEFAULT_MAX_LOAD_SIZE: usize = 100;

/// Tunables for the log entry store.
///
/// Immutable once handed to a store; build a new config to change values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationConfig {
    /// Expiry applied to columns written for transient stages.
    ///
    /// A transient record that is never superseded disappears after this
    /// long. Persistent stages ignore it.
    pub transient_timeout: Duration,

    /// Maximum number of entity ids a single batch read may request.
    pub max_load_size: usize,
}

impl SerializationConfig {
    /// Create a config with validation.
    ///
    /// Returns an error if `max_load_size` is 0, which would reject every
    /// batch read.
    pub fn new(transient_timeout: Duration, max_load_size: usize) -> Result<Self> {
        if max_load_size == 0 {
            return Err(Error::InvalidArgument(
                "max_load_size must be greater than 0".to_string(),
            ));
        }
        Ok(SerializationConfig {
            transient_timeout,
            max_load_size,
        })
    }
}

impl Default for SerializationConfig {
    fn default() -> Self {
        SerializationConfig {
            transient_timeout: DEFAULT_TRANSIENT_TIMEOUT,
            max_load_size: DEFAULT_MAX_LOAD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SerializationConfig::default();
        assert_eq!(config.transient_timeout, Duration::from_secs(5));
        assert_eq!(config.max_load_size, 100);
    }

    #[test]
    fn test_new_rejects_zero_batch_size() {
        let err = SerializationConfig::new(Duration::from_secs(1), 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_new_accepts_zero_timeout() {
        // A zero transient timeout is legal: records expire immediately.
        let config = SerializationConfig::new(Duration::ZERO, 10).unwrap();
        assert_eq!(config.transient_timeout, Duration::ZERO);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SerializationConfig::new(Duration::from_millis(2500), 42).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let restored: SerializationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
