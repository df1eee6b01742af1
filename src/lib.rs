//! # entitylog
//!
//! MVCC log entry store for a multi-tenant entity store.
//!
//! Every mutation attempt on an entity leaves a [`LogEntry`] recording
//! which phase of the write pipeline it reached and with what outcome.
//! Concurrent writers, crash recovery, and read-repair logic read the log
//! to decide the authoritative current version of an entity and to
//! reconstruct its mutation history.
//!
//! The log is backed by a wide-column store: one row per (scope, entity),
//! one column per version, columns physically ordered newest-first so
//! "latest version" reads seek a single column.
//!
//! ## Quick Start
//!
//! ```
//! use entitylog::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(InMemoryColumnStore::new());
//! let store = LogEntryStore::new(backend.clone(), SerializationConfig::default());
//!
//! let scope = CollectionScope::new(
//!     EntityId::random("application"),
//!     EntityId::random("organization"),
//!     "things",
//! );
//! let entity = EntityId::random("thing");
//! let version = Version::now();
//!
//! // Stage a log write and apply it (a real pipeline merges more intents
//! // into the batch first).
//! let entry = LogEntry::new(entity.clone(), version, Stage::Committed, State::Complete);
//! let batch = store.write(&scope, &entry);
//! backend.apply(batch)?;
//!
//! // Resolve the latest version at or below a bound.
//! let latest = store.load_latest(&scope, &[entity.clone()], version)?;
//! assert_eq!(latest.get(&entity).unwrap().version, version);
//! # Ok(())
//! # }
//! ```
//!
//! ## Atomic composition
//!
//! [`LogEntryStore::write`] and [`LogEntryStore::delete`] perform no I/O:
//! they return uncommitted [`MutationBatch`] intents. The surrounding write
//! pipeline merges the log intent with the entity payload and index intents
//! and applies them in one physical commit, so "did this attempt happen"
//! and "did its side effects happen" become durable together.
//!
//! ## Backends
//!
//! Production deployments implement [`ColumnStore`] over their cluster
//! client. [`InMemoryColumnStore`] is the bundled reference backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod codec;
pub mod config;
pub mod entry;
pub mod error;
pub mod keys;
pub mod memstore;
pub mod mutation;
pub mod prelude;
pub mod schema;
pub mod store;
pub mod types;
pub mod version_set;

pub use backend::{BackendError, ColumnStore, RowColumns};
pub use config::SerializationConfig;
pub use entry::{LogEntry, Stage, State};
pub use error::{Error, Result};
pub use keys::{scoped_row_key, RowKey};
pub use memstore::InMemoryColumnStore;
pub use mutation::{ColumnOp, MutationBatch, RowMutation};
pub use schema::ColumnFamilyDefinition;
pub use store::LogEntryStore;
pub use types::{CollectionScope, EntityId, Version};
pub use version_set::VersionSet;
