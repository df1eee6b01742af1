//! Log entry types for the write pipeline.
//!
//! A [`LogEntry`] documents which phase of the write pipeline a mutation
//! attempt reached ([`Stage`]) and with what outcome ([`State`]). The two
//! vocabularies are closed: each variant carries an explicit, version-stable
//! integer id that is written to storage, so adding or reordering variants
//! can never change what already-persisted records mean.

use crate::types::{EntityId, Version};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pipeline phase a log record documents.
///
/// Transient stages describe work still in flight; records written for them
/// expire automatically if never superseded. Persistent stages are part of
/// the permanent mutation history and never expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Write attempt started; entity payload not yet durable.
    Active,
    /// Write attempt is being undone.
    Rollback,
    /// Entity payload is durable.
    Committed,
    /// Post-commit side effects (index updates) are running.
    Postprocess,
    /// All side effects applied.
    Complete,
}

impl Stage {
    /// All stages (for iteration).
    pub const ALL: [Stage; 5] = [
        Stage::Active,
        Stage::Rollback,
        Stage::Committed,
        Stage::Postprocess,
        Stage::Complete,
    ];

    /// Version-stable integer id written to storage.
    pub const fn id(&self) -> u32 {
        match self {
            Stage::Active => 0,
            Stage::Rollback => 1,
            Stage::Committed => 2,
            Stage::Postprocess => 3,
            Stage::Complete => 4,
        }
    }

    /// Whether records for this stage are short-lived.
    ///
    /// Transient records are written with a finite expiry and self-delete if
    /// the pipeline never advances past them.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Stage::Active | Stage::Rollback)
    }

    /// Resolve a stored id back to a stage.
    ///
    /// Returns `None` for ids outside the vocabulary; callers treat that as
    /// corruption, never as a default.
    pub fn from_id(id: u32) -> Option<Stage> {
        STAGE_IDS.get(&id).copied()
    }

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Stage::Active => "Active",
            Stage::Rollback => "Rollback",
            Stage::Committed => "Committed",
            Stage::Postprocess => "Postprocess",
            Stage::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome recorded for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// The stage finished all of its work.
    Complete,
    /// The stage finished only part of its work.
    Partial,
}

impl State {
    /// All states (for iteration).
    pub const ALL: [State; 2] = [State::Complete, State::Partial];

    /// Version-stable integer id written to storage.
    pub const fn id(&self) -> u32 {
        match self {
            State::Complete => 0,
            State::Partial => 1,
        }
    }

    /// Resolve a stored id back to a state.
    pub fn from_id(id: u32) -> Option<State> {
        STATE_IDS.get(&id).copied()
    }

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            State::Complete => "Complete",
            State::Partial => "Partial",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// id -> variant tables, built once at first use and read-only thereafter.
// Safe for unsynchronized concurrent reads.
static STAGE_IDS: Lazy<HashMap<u32, Stage>> =
    Lazy::new(|| Stage::ALL.iter().map(|stage| (stage.id(), *stage)).collect());

static STATE_IDS: Lazy<HashMap<u32, State>> =
    Lazy::new(|| State::ALL.iter().map(|state| (state.id(), *state)).collect());

/// One immutable record in the entity log.
///
/// A log entry is created by a pipeline stage and superseded, never mutated,
/// by later writes at new versions. It is removed only by an explicit
/// delete or, for transient stages, by expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entity the mutation attempt targets.
    pub entity_id: EntityId,
    /// Version minted for the mutation attempt.
    pub version: Version,
    /// Pipeline phase reached.
    pub stage: Stage,
    /// Outcome recorded for the phase.
    pub state: State,
}

impl LogEntry {
    /// Create a new log entry.
    pub fn new(entity_id: EntityId, version: Version, stage: Stage, state: State) -> Self {
        LogEntry {
            entity_id,
            version,
            stage,
            state,
        }
    }
}
