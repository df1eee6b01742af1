//! Column store client interface.
//!
//! The log entry store is a library layer over an external wide-column
//! store. This module defines the narrow client surface it needs from that
//! store: atomic batch application and reversed range reads. Transport,
//! pooling, and query execution all live behind the trait.

use crate::keys::RowKey;
use crate::mutation::MutationBatch;
use crate::types::Version;
use thiserror::Error;

/// Failure surfaced by a column store backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The store could not be reached or the query failed in transit.
    #[error("column store unavailable: {0}")]
    Unavailable(String),
}

/// One row of a range-query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowColumns {
    /// Row the columns belong to.
    pub row: RowKey,
    /// Columns in descending version order, newest first. May be empty.
    pub columns: Vec<(Version, Vec<u8>)>,
}

/// Client interface to the wide-column store.
///
/// Implementations must uphold the row contract the read paths depend on:
///
/// - Columns within a row are returned in descending version order.
/// - A multi-row read returns one [`RowColumns`] per requested row, with an
///   empty column list for rows that hold nothing in range. Result order
///   across rows is unspecified.
/// - Expired columns are never returned.
///
/// All blocking happens inside the implementation for the duration of a
/// store round trip; the trait itself holds no locks.
pub trait ColumnStore: Send + Sync {
    /// Atomically apply a staged mutation batch.
    fn apply(&self, batch: MutationBatch) -> Result<(), BackendError>;

    /// Reversed range read over several rows.
    ///
    /// For each requested row, returns up to `limit` columns whose version
    /// is at or below `start`, newest first.
    fn multiget_columns(
        &self,
        rows: &[RowKey],
        start: Version,
        limit: usize,
    ) -> Result<Vec<RowColumns>, BackendError>;

    /// Reversed range read over a single row.
    ///
    /// Returns up to `limit` columns whose version is at or below `start`,
    /// newest first.
    fn get_columns(
        &self,
        row: &RowKey,
        start: Version,
        limit: usize,
    ) -> Result<Vec<(Version, Vec<u8>)>, BackendError>;
}
