//! Errors surfaced by the stat engine.
//!
//! Live stat mutations never fail: immutable stats, out-of-range values and
//! invalid revive requests are policy outcomes, not errors. The only fallible
//! surface is loading a table from a snapshot.

use crate::stats::StatKind;

/// Field of a [`StatRecord`](crate::stats::StatRecord), for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RecordField {
    Base,
    Modifier,
    LowerLimit,
    UpperLimit,
}

/// Errors that occur when restoring a [`StatTable`](crate::stats::StatTable)
/// from a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotError {
    /// The same stat appears more than once.
    #[error("stat {0} appears more than once in snapshot")]
    DuplicateStat(StatKind),

    /// A value is NaN or infinite.
    #[error("stat {kind} has a non-finite {field}")]
    NonFinite { kind: StatKind, field: RecordField },
}
