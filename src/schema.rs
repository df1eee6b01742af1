//! Physical column-family layout declaration.
//!
//! The store declares the layout its range queries depend on; a schema
//! migration collaborator reads the declaration once during provisioning
//! and applies it. Nothing here issues DDL.

use serde::{Deserialize, Serialize};

/// Name of the entity log column family.
pub const ENTITY_LOG: &str = "Entity_Log";

/// Row-key validation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyValidator {
    /// Opaque byte strings.
    Bytes,
    /// UTF-8 text.
    Utf8,
}

/// Physical ordering of column keys within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnComparator {
    /// Time-ordered versions, ascending.
    Version,
    /// Time-ordered versions, descending: newest column first.
    ReversedVersion,
}

/// Declared column-value validation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueValidator {
    /// Opaque byte strings.
    Bytes,
    /// Variable-length integers.
    Integer,
}

/// Row-cache policy for a column family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheOption {
    /// Cache keys and rows.
    All,
    /// Cache row-key lookups only.
    Keys,
    /// Cache whole rows.
    Rows,
    /// No caching.
    NoCache,
}

/// One column-family-equivalent layout specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFamilyDefinition {
    /// Column family name.
    pub name: String,
    /// How row keys validate.
    pub key_validator: KeyValidator,
    /// How columns order within a row.
    pub comparator: ColumnComparator,
    /// How column values validate.
    pub value_validator: ValueValidator,
    /// Cache policy.
    pub cache: CacheOption,
}

impl ColumnFamilyDefinition {
    /// Layout of the entity log.
    ///
    /// Columns order descending so the most recent version sits at the top
    /// of the row and "latest version" reads seek one column. Only key
    /// lookups are cached: the family is scanned in ranges far more often
    /// than it is point-read by a known column.
    ///
    /// The declared value validator is applied at provisioning time only;
    /// decoding always goes through the fixed-width stage codec.
    pub fn entity_log() -> Self {
        ColumnFamilyDefinition {
            name: ENTITY_LOG.to_string(),
            key_validator: KeyValidator::Bytes,
            comparator: ColumnComparator::ReversedVersion,
            value_validator: ValueValidator::Integer,
            cache: CacheOption::Keys,
        }
    }
}
