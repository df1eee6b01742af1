//! Composite scoped row keys.
//!
//! All tenants share one physical table; a row is addressed by the
//! concatenation of its scope's identifying fields followed by the entity
//! id's fields. Every variable-length field is length-prefixed, so the
//! encoding is injective: two distinct (scope, entity) pairs can never
//! produce the same byte string, and field boundaries can never shift into
//! one another.
//!
//! Column keys within a row are raw [`Version`](crate::types::Version)
//! values and are not built here.

use crate::types::{CollectionScope, EntityId};
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

/// Opaque composite row key.
///
/// Treated as an uninterpreted byte string by the column store; only this
/// module knows its internal layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey(Vec<u8>);

impl RowKey {
    /// Raw bytes of the key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the key is empty. Scoped keys never are.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the composite row key for an entity within a scope.
///
/// Layout: application id, owner id, collection name, entity id. Each id
/// is 16 raw uuid bytes plus its length-prefixed kind tag; the name is a
/// length-prefixed string.
pub fn scoped_row_key(scope: &CollectionScope, entity_id: &EntityId) -> RowKey {
    // 3 ids at 16 + 4 + kind bytes each, plus the prefixed name.
    let mut buf = Vec::with_capacity(
        3 * (16 + 4)
            + scope.application.kind().len()
            + scope.owner.kind().len()
            + entity_id.kind().len()
            + 4
            + scope.name.len(),
    );

    push_id(&mut buf, &scope.application);
    push_id(&mut buf, &scope.owner);
    push_str(&mut buf, &scope.name);
    push_id(&mut buf, entity_id);

    RowKey(buf)
}

fn push_id(buf: &mut Vec<u8>, id: &EntityId) {
    buf.extend_from_slice(id.uuid().as_bytes());
    push_str(buf, id.kind());
}

// Four-byte big-endian length prefix keeps the encoding injective for any
// field length.
fn push_str(buf: &mut Vec<u8>, field: &str) {
    let bytes = field.as_bytes();
    let mut len = [0u8; 4];
    BigEndian::write_u32(&mut len, bytes.len() as u32);
    buf.extend_from_slice(&len);
    buf.extend_from_slice(bytes);
}
