//! Unified error types for the log entry store.
//!
//! Every failure surfaces to the immediate caller; the store performs no
//! internal retries and no partial-success reporting.

use thiserror::Error;

/// All log entry store errors.
///
/// The taxonomy is deliberately small:
///
/// - [`Error::InvalidArgument`] is raised synchronously before any I/O and
///   means the call itself must be fixed.
/// - [`Error::StoreUnavailable`] wraps a backend connectivity failure; the
///   caller decides whether to retry the whole pipeline step.
/// - [`Error::Corruption`] means a stored record did not decode. It is never
///   coerced to a default value.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing, empty, or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying column store could not be reached or the query failed
    /// in transit.
    #[error("store unavailable for scope {scope}: {message}")]
    StoreUnavailable {
        /// Scope the failed operation ran under, for diagnostics.
        scope: String,
        /// Backend failure description.
        message: String,
    },

    /// A stored record's bytes did not resolve to a known stage/state pair.
    ///
    /// Indicates storage corruption or a schema version skew.
    #[error("corrupt log record: {0}")]
    Corruption(String),
}

/// Result type for log entry store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from the backend connection.
    ///
    /// Unavailable errors may succeed if the caller retries the whole
    /// operation once the store is reachable again.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::StoreUnavailable { .. })
    }

    /// Check if this is a caller mistake that no retry can fix.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this is a corruption error.
    ///
    /// Corruption is fatal for the affected record and must be handled
    /// locally, never retried.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corruption(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_classification() {
        let err = Error::InvalidArgument("maxSize must be greater than 0".to_string());
        assert!(err.is_invalid_argument());
        assert!(!err.is_unavailable());
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_unavailable_classification() {
        let err = Error::StoreUnavailable {
            scope: "app/owner/things".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.is_unavailable());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_corruption_classification() {
        let err = Error::Corruption("unknown stage id 99".to_string());
        assert!(err.is_corruption());
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_display_includes_scope() {
        let err = Error::StoreUnavailable {
            scope: "app/owner/things".to_string(),
            message: "timed out".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("app/owner/things"));
        assert!(rendered.contains("timed out"));
    }
}
