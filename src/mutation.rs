//! Deferred mutation intents.
//!
//! Write paths never touch the store directly. They stage their changes
//! into a [`MutationBatch`], a plain description of intended column writes
//! and deletes, and hand it back to the caller. The caller merges batches
//! from several pipeline stages (log entry, entity payload, secondary
//! indexes) and applies them as one atomic commit.
//!
//! A batch carries no implicit transaction boundary of its own: durability
//! succeeds or fails when the merged batch is applied, not when it is
//! staged.

use crate::keys::RowKey;
use crate::types::Version;
use std::time::Duration;

/// A single staged column operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOp {
    /// Set a column to a value, optionally expiring after `ttl`.
    Set {
        /// Column key.
        column: Version,
        /// Column value bytes.
        value: Vec<u8>,
        /// Expiry for transient records; `None` means never expires.
        ttl: Option<Duration>,
    },
    /// Delete a single column.
    Delete {
        /// Column key.
        column: Version,
    },
}

/// One staged mutation against one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMutation {
    /// Row the operation targets.
    pub row: RowKey,
    /// The staged operation.
    pub op: ColumnOp,
}

/// An uncommitted, composable batch of row mutations.
///
/// Staging operations performs no I/O. Batches merge in staging order, so a
/// caller can combine intents from unrelated components and apply them in
/// one physical commit.
///
/// # Examples
///
/// ```ignore
/// let mut batch = log_store.write(&scope, &entry);
/// batch.merge(payload_intent);
/// batch.merge(index_intent);
/// backend.apply(batch)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    ops: Vec<RowMutation>,
}

impl MutationBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        MutationBatch::default()
    }

    /// Stage a column write.
    pub fn set_column(
        &mut self,
        row: RowKey,
        column: Version,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) {
        self.ops.push(RowMutation {
            row,
            op: ColumnOp::Set { column, value, ttl },
        });
    }

    /// Stage a column delete.
    pub fn delete_column(&mut self, row: RowKey, column: Version) {
        self.ops.push(RowMutation {
            row,
            op: ColumnOp::Delete { column },
        });
    }

    /// Append all operations of `other` to this batch.
    pub fn merge(&mut self, other: MutationBatch) {
        self.ops.extend(other.ops);
    }

    /// Number of staged operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if no operations are staged.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the staged operations in staging order.
    pub fn iter(&self) -> std::slice::Iter<'_, RowMutation> {
        self.ops.iter()
    }
}

impl IntoIterator for MutationBatch {
    type Item = RowMutation;
    type IntoIter = std::vec::IntoIter<RowMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a MutationBatch {
    type Item = &'a RowMutation;
    type IntoIter = std::slice::Iter<'a, RowMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
