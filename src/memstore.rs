//! In-memory column store backend.
//!
//! A reference [`ColumnStore`] for tests and embedders that do not run
//! against a cluster. Rows live in a `RwLock`-guarded map; each row keys
//! its columns by `Reverse<Version>` so the descending physical order the
//! read paths rely on is the literal iteration order of the row, not a
//! query-time sort. Column TTLs become per-cell expiry instants checked on
//! every read.

use crate::backend::{BackendError, ColumnStore, RowColumns};
use crate::keys::RowKey;
use crate::mutation::{ColumnOp, MutationBatch};
use crate::types::Version;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

#[derive(Debug, Clone)]
struct Cell {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Cell {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

type Row = BTreeMap<Reverse<Version>, Cell>;

/// In-memory wide-column store.
///
/// Thread-safe: batch application takes the write lock, reads take the read
/// lock. Batches are atomic with respect to readers.
#[derive(Debug, Default)]
pub struct InMemoryColumnStore {
    rows: RwLock<HashMap<RowKey, Row>>,
}

impl InMemoryColumnStore {
    /// Create an empty store.
    pub fn new() -> Self {
        InMemoryColumnStore::default()
    }

    /// Number of rows ever written, including rows whose columns have all
    /// expired or been deleted.
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    /// Number of live columns in a row.
    pub fn column_count(&self, row: &RowKey) -> usize {
        let now = Instant::now();
        self.rows
            .read()
            .get(row)
            .map(|columns| columns.values().filter(|cell| cell.is_live(now)).count())
            .unwrap_or(0)
    }

    /// Drop expired cells eagerly instead of waiting for reads to skip them.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let mut rows = self.rows.write();
        for columns in rows.values_mut() {
            columns.retain(|_, cell| cell.is_live(now));
        }
    }

    fn read_row(columns: &Row, start: Version, limit: usize, now: Instant) -> Vec<(Version, Vec<u8>)> {
        // Reverse(start).. walks versions from start downward.
        columns
            .range(Reverse(start)..)
            .filter(|(_, cell)| cell.is_live(now))
            .take(limit)
            .map(|(Reverse(version), cell)| (*version, cell.value.clone()))
            .collect()
    }
}

impl ColumnStore for InMemoryColumnStore {
    fn apply(&self, batch: MutationBatch) -> Result<(), BackendError> {
        let now = Instant::now();
        let mut rows = self.rows.write();

        for mutation in batch {
            let columns = rows.entry(mutation.row).or_default();
            match mutation.op {
                ColumnOp::Set { column, value, ttl } => {
                    let expires_at = ttl.map(|ttl| now + ttl);
                    columns.insert(Reverse(column), Cell { value, expires_at });
                }
                ColumnOp::Delete { column } => {
                    columns.remove(&Reverse(column));
                }
            }
        }

        Ok(())
    }

    fn multiget_columns(
        &self,
        row_keys: &[RowKey],
        start: Version,
        limit: usize,
    ) -> Result<Vec<RowColumns>, BackendError> {
        let now = Instant::now();
        let rows = self.rows.read();

        Ok(row_keys
            .iter()
            .map(|row| RowColumns {
                row: row.clone(),
                columns: rows
                    .get(row)
                    .map(|columns| Self::read_row(columns, start, limit, now))
                    .unwrap_or_default(),
            })
            .collect())
    }

    fn get_columns(
        &self,
        row: &RowKey,
        start: Version,
        limit: usize,
    ) -> Result<Vec<(Version, Vec<u8>)>, BackendError> {
        let now = Instant::now();
        Ok(self
            .rows
            .read()
            .get(row)
            .map(|columns| Self::read_row(columns, start, limit, now))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::scoped_row_key;
    use crate::types::{CollectionScope, EntityId};
    use std::time::Duration;

    fn row_key() -> RowKey {
        let scope = CollectionScope::new(
            EntityId::random("application"),
            EntityId::random("organization"),
            "things",
        );
        scoped_row_key(&scope, &EntityId::random("thing"))
    }

    fn set(store: &InMemoryColumnStore, row: &RowKey, version: Version, value: u8) {
        let mut batch = MutationBatch::new();
        batch.set_column(row.clone(), version, vec![value], None);
        store.apply(batch).unwrap();
    }

    #[test]
    fn test_columns_come_back_descending() {
        let store = InMemoryColumnStore::new();
        let row = row_key();

        let v1 = Version::now();
        let v2 = Version::now();
        let v3 = Version::now();

        // Insert out of order; the row layout sorts, not the query.
        set(&store, &row, v2, 2);
        set(&store, &row, v1, 1);
        set(&store, &row, v3, 3);

        let columns = store.get_columns(&row, v3, 10).unwrap();
        let versions: Vec<Version> = columns.iter().map(|(v, _)| *v).collect();
        assert_eq!(versions, vec![v3, v2, v1]);
    }

    #[test]
    fn test_range_start_excludes_newer() {
        let store = InMemoryColumnStore::new();
        let row = row_key();

        let v1 = Version::now();
        let v2 = Version::now();
        set(&store, &row, v1, 1);
        set(&store, &row, v2, 2);

        let columns = store.get_columns(&row, v1, 10).unwrap();
        let versions: Vec<Version> = columns.iter().map(|(v, _)| *v).collect();
        assert_eq!(versions, vec![v1], "Columns newer than start must be excluded");
    }

    #[test]
    fn test_limit_is_honored() {
        let store = InMemoryColumnStore::new();
        let row = row_key();

        let versions: Vec<Version> = (0..5).map(|_| Version::now()).collect();
        for (i, version) in versions.iter().enumerate() {
            set(&store, &row, *version, i as u8);
        }

        let columns = store.get_columns(&row, versions[4], 2).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].0, versions[4]);
        assert_eq!(columns[1].0, versions[3]);
    }

    #[test]
    fn test_delete_removes_single_column() {
        let store = InMemoryColumnStore::new();
        let row = row_key();

        let v1 = Version::now();
        let v2 = Version::now();
        set(&store, &row, v1, 1);
        set(&store, &row, v2, 2);

        let mut batch = MutationBatch::new();
        batch.delete_column(row.clone(), v2);
        store.apply(batch).unwrap();

        let columns = store.get_columns(&row, v2, 10).unwrap();
        let versions: Vec<Version> = columns.iter().map(|(v, _)| *v).collect();
        assert_eq!(versions, vec![v1], "Only the deleted column should go");
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let store = InMemoryColumnStore::new();
        let row = row_key();
        let version = Version::now();

        let mut batch = MutationBatch::new();
        batch.set_column(row.clone(), version, vec![1], Some(Duration::ZERO));
        store.apply(batch).unwrap();

        std::thread::sleep(Duration::from_millis(2));

        assert!(store.get_columns(&row, version, 10).unwrap().is_empty());
        assert_eq!(store.column_count(&row), 0);
    }

    #[test]
    fn test_unexpired_ttl_still_visible() {
        let store = InMemoryColumnStore::new();
        let row = row_key();
        let version = Version::now();

        let mut batch = MutationBatch::new();
        batch.set_column(row.clone(), version, vec![1], Some(Duration::from_secs(3600)));
        store.apply(batch).unwrap();

        assert_eq!(store.get_columns(&row, version, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_multiget_returns_every_requested_row() {
        let store = InMemoryColumnStore::new();
        let populated = row_key();
        let empty = row_key();

        let version = Version::now();
        set(&store, &populated, version, 1);

        let results = store
            .multiget_columns(&[populated.clone(), empty.clone()], version, 1)
            .unwrap();

        assert_eq!(results.len(), 2);
        let by_row: HashMap<&RowKey, usize> = results
            .iter()
            .map(|row| (&row.row, row.columns.len()))
            .collect();
        assert_eq!(by_row[&populated], 1);
        assert_eq!(by_row[&empty], 0, "Empty rows still appear in the result");
    }

    #[test]
    fn test_purge_expired_drops_cells() {
        let store = InMemoryColumnStore::new();
        let row = row_key();
        let version = Version::now();

        let mut batch = MutationBatch::new();
        batch.set_column(row.clone(), version, vec![1], Some(Duration::ZERO));
        store.apply(batch).unwrap();

        std::thread::sleep(Duration::from_millis(2));
        store.purge_expired();

        let rows = store.rows.read();
        assert!(rows.get(&row).unwrap().is_empty());
    }

    #[test]
    fn test_batch_apply_is_atomic_across_rows() {
        let store = InMemoryColumnStore::new();
        let row_a = row_key();
        let row_b = row_key();
        let version = Version::now();

        let mut batch = MutationBatch::new();
        batch.set_column(row_a.clone(), version, vec![1], None);
        batch.set_column(row_b.clone(), version, vec![2], None);
        store.apply(batch).unwrap();

        assert_eq!(store.column_count(&row_a), 1);
        assert_eq!(store.column_count(&row_b), 1);
    }
}
