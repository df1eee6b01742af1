//! Batch-read result set.

use crate::entry::LogEntry;
use crate::types::EntityId;
use std::collections::hash_map;
use std::collections::HashMap;

/// Mapping from entity id to its resolved latest log entry.
///
/// Built by a batch read and discarded after consumption. Holds at most one
/// entry per requested entity id; ids with no qualifying record are simply
/// absent, never null-valued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionSet {
    entries: HashMap<EntityId, LogEntry>,
}

impl VersionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        VersionSet::default()
    }

    /// Create an empty set sized for an expected number of entries.
    pub fn with_capacity(capacity: usize) -> Self {
        VersionSet {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an entry keyed by its entity id.
    ///
    /// Write-once per id: the first entry added for an id wins and later
    /// adds for the same id are ignored. Each id appears at most once per
    /// underlying row result, so a second add signals a duplicate row.
    pub fn add(&mut self, entry: LogEntry) {
        let entity_id = entry.entity_id.clone();
        self.entries.entry(entity_id).or_insert(entry);
    }

    /// Look up the resolved entry for an entity id.
    pub fn get(&self, entity_id: &EntityId) -> Option<&LogEntry> {
        self.entries.get(entity_id)
    }

    /// Check if an entity id resolved to an entry.
    pub fn contains(&self, entity_id: &EntityId) -> bool {
        self.entries.contains_key(entity_id)
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entity resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all resolved entries.
    pub fn iter(&self) -> hash_map::Iter<'_, EntityId, LogEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for VersionSet {
    type Item = (EntityId, LogEntry);
    type IntoIter = hash_map::IntoIter<EntityId, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = (&'a EntityId, &'a LogEntry);
    type IntoIter = hash_map::Iter<'a, EntityId, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Stage, State};
    use crate::types::Version;

    fn entry(entity_id: &EntityId, version: Version) -> LogEntry {
        LogEntry::new(entity_id.clone(), version, Stage::Committed, State::Complete)
    }

    #[test]
    fn test_empty_set() {
        let set = VersionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_add_and_get() {
        let entity_id = EntityId::random("thing");
        let version = Version::now();

        let mut set = VersionSet::with_capacity(1);
        set.add(entry(&entity_id, version));

        assert_eq!(set.len(), 1);
        assert!(set.contains(&entity_id));
        assert_eq!(set.get(&entity_id).unwrap().version, version);
    }

    #[test]
    fn test_first_add_wins() {
        let entity_id = EntityId::random("thing");
        let first = Version::now();
        let second = Version::now();

        let mut set = VersionSet::new();
        set.add(entry(&entity_id, first));
        set.add(entry(&entity_id, second));

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(&entity_id).unwrap().version,
            first,
            "Later adds for the same id should be ignored"
        );
    }

    #[test]
    fn test_missing_id_is_absent() {
        let set = VersionSet::new();
        let entity_id = EntityId::random("thing");
        assert!(set.get(&entity_id).is_none());
        assert!(!set.contains(&entity_id));
    }

    #[test]
    fn test_iteration() {
        let a = EntityId::random("thing");
        let b = EntityId::random("thing");

        let mut set = VersionSet::with_capacity(2);
        set.add(entry(&a, Version::now()));
        set.add(entry(&b, Version::now()));

        let ids: Vec<&EntityId> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&&a));
        assert!(ids.contains(&&b));
    }

    #[test]
    fn test_into_iterator() {
        let entity_id = EntityId::random("thing");
        let mut set = VersionSet::new();
        set.add(entry(&entity_id, Version::now()));

        let collected: Vec<(EntityId, LogEntry)> = set.into_iter().collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].0, entity_id);
    }
}
