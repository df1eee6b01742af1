//! Core identity types for the entity log.
//!
//! This module defines the types every other module keys on:
//! - [`EntityId`]: identity of a logical entity
//! - [`Version`]: identity of one mutation attempt on an entity
//! - [`CollectionScope`]: tenant/collection namespace rows are computed within

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::timestamp::context::ContextV7;
use uuid::{Timestamp, Uuid};

/// Identity of a logical entity: a unique id plus a kind tag.
///
/// Entity ids are created by the surrounding entity store and are immutable.
/// Two entities with the same uuid but different kinds are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    uuid: Uuid,
    kind: String,
}

impl EntityId {
    /// Create an entity id from its parts.
    pub fn new(uuid: Uuid, kind: impl Into<String>) -> Self {
        EntityId {
            uuid,
            kind: kind.into(),
        }
    }

    /// Create an entity id with a random uuid and the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitylog::types::EntityId;
    ///
    /// let a = EntityId::random("thing");
    /// let b = EntityId::random("thing");
    /// assert_ne!(a, b);
    /// ```
    pub fn random(kind: impl Into<String>) -> Self {
        EntityId {
            uuid: Uuid::new_v4(),
            kind: kind.into(),
        }
    }

    /// The unique id component.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The kind tag component.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.uuid)
    }
}

// Process-wide v7 context so versions minted in the same millisecond still
// order by mint sequence.
static VERSION_CONTEXT: Lazy<Mutex<ContextV7>> = Lazy::new(|| Mutex::new(ContextV7::new()));

/// Identity of one mutation attempt on an entity.
///
/// A version is minted once per write attempt, never reused, and is strictly
/// increasing in real time (not contiguous). It embeds its creation
/// timestamp, and its big-endian byte order is creation order, which is what
/// the column layout sorts on.
///
/// # Examples
///
/// ```
/// use entitylog::types::Version;
///
/// let v1 = Version::now();
/// let v2 = Version::now();
/// assert!(v1 < v2);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Version(Uuid);

impl Version {
    /// Mint a new version for a write attempt happening now.
    pub fn now() -> Self {
        Version(Uuid::new_v7(Timestamp::now(&*VERSION_CONTEXT)))
    }

    /// Wrap an existing time-ordered uuid.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Version(uuid)
    }

    /// The underlying uuid.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Raw bytes, big-endian, creation-time ordered.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Reconstruct a version from raw bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Version(Uuid::from_bytes(bytes))
    }

    /// The creation timestamp embedded in this version, in milliseconds
    /// since the Unix epoch.
    ///
    /// Returns `None` for uuids that carry no timestamp.
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.0.get_timestamp().map(|ts| {
            let (secs, nanos) = ts.to_unix();
            secs * 1000 + u64::from(nanos) / 1_000_000
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant/collection namespace a row key is computed within.
///
/// A scope mixes tenants into a shared physical table: isolation comes from
/// key namespacing, not physical separation, so one schema serves all
/// tenants and the store's partitioning applies uniformly.
///
/// Scopes are created by the caller per logical collection and are
/// immutable; they are never persisted directly, only embedded in row keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionScope {
    /// Organization the collection belongs to.
    pub application: EntityId,
    /// Owner of the collection within the organization.
    pub owner: EntityId,
    /// Collection name.
    pub name: String,
}

impl CollectionScope {
    /// Create a new scope.
    pub fn new(application: EntityId, owner: EntityId, name: impl Into<String>) -> Self {
        CollectionScope {
            application,
            owner,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for CollectionScope {
    /// Display scope in the format: application/owner/name
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.application, self.owner, self.name)
    }
}
