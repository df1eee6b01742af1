//! Convenient imports for the entity log.
//!
//! Re-exports the most commonly used types so callers can get started with
//! a single import:
//!
//! ```
//! use entitylog::prelude::*;
//! ```

// Store and backends
pub use crate::backend::ColumnStore;
pub use crate::memstore::InMemoryColumnStore;
pub use crate::store::LogEntryStore;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::entry::{LogEntry, Stage, State};
pub use crate::types::{CollectionScope, EntityId, Version};

// Intents and results
pub use crate::mutation::MutationBatch;
pub use crate::version_set::VersionSet;

// Configuration
pub use crate::config::SerializationConfig;
