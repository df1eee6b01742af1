//! Log entry store: write, delete, and range reads over the entity log.
//!
//! ## Design
//!
//! The store is a stateless facade over a [`ColumnStore`] backend. Write
//! paths stage [`MutationBatch`] intents and perform no I/O, so a pipeline
//! can couple the log write with the entity payload and index writes in one
//! atomic apply. Read paths answer two questions:
//!
//! - `load_latest`: for a batch of entities, what is the newest record at
//!   or below a version bound?
//! - `load_history`: for one entity, what are the most recent records at or
//!   below a version bound?
//!
//! Both ride on the descending column order declared in
//! [`ColumnFamilyDefinition::entity_log`], which turns "latest version"
//! into a one-column seek.

use crate::backend::{BackendError, ColumnStore};
use crate::codec;
use crate::config::SerializationConfig;
use crate::entry::LogEntry;
use crate::error::{Error, Result};
use crate::keys::{scoped_row_key, RowKey};
use crate::mutation::MutationBatch;
use crate::schema::ColumnFamilyDefinition;
use crate::types::{CollectionScope, EntityId, Version};
use crate::version_set::VersionSet;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Reads and writes MVCC log entries against a wide-column backend.
///
/// Stateless and safe for concurrent use; all blocking happens inside the
/// backend for the duration of a store round trip. Clones share the
/// backend handle.
#[derive(Debug)]
pub struct LogEntryStore<S> {
    backend: Arc<S>,
    config: SerializationConfig,
}

// Clone shares the backend handle; S itself is never cloned.
impl<S> Clone for LogEntryStore<S> {
    fn clone(&self) -> Self {
        LogEntryStore {
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
        }
    }
}

impl<S: ColumnStore> LogEntryStore<S> {
    /// Create a store over a backend with the given configuration.
    pub fn new(backend: Arc<S>, config: SerializationConfig) -> Self {
        LogEntryStore { backend, config }
    }

    /// The store's configuration.
    pub fn config(&self) -> &SerializationConfig {
        &self.config
    }

    /// The shared backend handle.
    pub fn backend(&self) -> &Arc<S> {
        &self.backend
    }

    /// Stage a log entry write.
    ///
    /// Encodes the entry's (stage, state) pair and stages a column set at
    /// (scoped row, entry version). Transient stages get the configured
    /// expiry; persistent stages never expire. Performs no I/O: the
    /// returned batch is uncommitted and composes with other intents via
    /// [`MutationBatch::merge`].
    pub fn write(&self, scope: &CollectionScope, entry: &LogEntry) -> MutationBatch {
        let value = codec::encode(entry.stage, entry.state).to_vec();
        let ttl = if entry.stage.is_transient() {
            Some(self.config.transient_timeout)
        } else {
            None
        };

        self.row_mutation(scope, &entry.entity_id, entry.version, |batch, row| {
            batch.set_column(row, entry.version, value, ttl);
        })
    }

    /// Stage a delete of exactly one log record.
    ///
    /// Removes the single column at (scoped row, version); never the whole
    /// row. Same deferred-commit contract as [`LogEntryStore::write`].
    pub fn delete(
        &self,
        scope: &CollectionScope,
        entity_id: &EntityId,
        version: Version,
    ) -> MutationBatch {
        self.row_mutation(scope, entity_id, version, |batch, row| {
            batch.delete_column(row, version);
        })
    }

    /// Resolve the latest record at or below `max_version` for a batch of
    /// entities.
    ///
    /// Issues one reversed range query per row with a one-column limit:
    /// because columns sort descending, the first column at or below the
    /// bound is the newest qualifying record. Entities whose rows are empty
    /// or hold only newer records are absent from the result.
    pub fn load_latest(
        &self,
        scope: &CollectionScope,
        entity_ids: &[EntityId],
        max_version: Version,
    ) -> Result<VersionSet> {
        if entity_ids.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one entity id is required".to_string(),
            ));
        }
        if entity_ids.len() > self.config.max_load_size {
            return Err(Error::InvalidArgument(format!(
                "requested {} ids, configured maximum is {}",
                entity_ids.len(),
                self.config.max_load_size
            )));
        }

        let mut rows = Vec::with_capacity(entity_ids.len());
        let mut row_index: HashMap<RowKey, &EntityId> = HashMap::with_capacity(entity_ids.len());
        for entity_id in entity_ids {
            let row = scoped_row_key(scope, entity_id);
            rows.push(row.clone());
            row_index.insert(row, entity_id);
        }

        let results = self
            .backend
            .multiget_columns(&rows, max_version, 1)
            .map_err(|err| self.unavailable(scope, err))?;

        let mut resolved = VersionSet::with_capacity(entity_ids.len());
        for row_result in results {
            let mut columns = row_result.columns;
            if columns.is_empty() {
                continue;
            }

            let entity_id = match row_index.get(&row_result.row) {
                Some(entity_id) => (*entity_id).clone(),
                // A row nothing asked for cannot be attributed to an entity.
                None => continue,
            };

            let (version, raw) = columns.remove(0);
            let (stage, state) = codec::decode(&raw)?;
            resolved.add(LogEntry::new(entity_id, version, stage, state));
        }

        Ok(resolved)
    }

    /// Load up to `max_size` records for one entity, newest first, all at
    /// or below `version`.
    ///
    /// An empty result is valid and means no qualifying record exists.
    pub fn load_history(
        &self,
        scope: &CollectionScope,
        entity_id: &EntityId,
        version: Version,
        max_size: usize,
    ) -> Result<Vec<LogEntry>> {
        if max_size == 0 {
            return Err(Error::InvalidArgument(
                "max_size must be greater than 0".to_string(),
            ));
        }

        let row = scoped_row_key(scope, entity_id);
        let columns = self
            .backend
            .get_columns(&row, version, max_size)
            .map_err(|err| self.unavailable(scope, err))?;

        let mut results = Vec::with_capacity(columns.len());
        for (stored_version, raw) in columns {
            let (stage, state) = codec::decode(&raw)?;
            results.push(LogEntry::new(entity_id.clone(), stored_version, stage, state));
        }

        Ok(results)
    }

    /// Declare the physical layout this store's queries depend on.
    ///
    /// Consumed by a schema migration collaborator during provisioning;
    /// never applied here.
    pub fn column_families(&self) -> Vec<ColumnFamilyDefinition> {
        vec![ColumnFamilyDefinition::entity_log()]
    }

    // Common row setup for the column put and delete paths.
    fn row_mutation<F>(
        &self,
        scope: &CollectionScope,
        entity_id: &EntityId,
        version: Version,
        op: F,
    ) -> MutationBatch
    where
        F: FnOnce(&mut MutationBatch, RowKey),
    {
        let row = scoped_row_key(scope, entity_id);

        debug!(
            scope = %scope,
            entity = %entity_id,
            timestamp = ?version.timestamp_ms(),
            "staging log entry mutation"
        );

        let mut batch = MutationBatch::new();
        op(&mut batch, row);
        batch
    }

    fn unavailable(&self, scope: &CollectionScope, err: BackendError) -> Error {
        Error::StoreUnavailable {
            scope: scope.to_string(),
            message: err.to_string(),
        }
    }
}
