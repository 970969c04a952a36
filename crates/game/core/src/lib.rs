//! Character statistics and life-condition engine.
//!
//! `charstats-core` tracks a character's base attributes, the modifiers
//! layered on top of them and the per-stat limits that bound those modifiers,
//! and derives a discrete condition (healthy, knockout, limbo, dead) from
//! effective HP. All mutation flows through [`Character`], which re-evaluates
//! the condition synchronously whenever a condition-relevant stat changes.
//!
//! Randomness and diagnostics are injected: stat rolls take a
//! [`RandomSource`], and condition transitions are reported to a
//! [`DiagnosticSink`].
pub mod character;
pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod stats;

pub use character::Character;
pub use condition::{
    ConditionEngine, ConditionKind, ConditionTransition, DiagnosticSink, MemorySink, NullSink,
    TracingSink,
};
pub use config::StatsConfig;
pub use env::{PcgRng, RandomSource, SequenceRng};
pub use error::{RecordField, SnapshotError};
pub use stats::{
    DiceSpec, StatKind, StatLimits, StatRecord, StatRules, StatSnapshot, StatTable,
    TimedModifier, TimedModifiers, WriteOutcome, roll_dice_drop_lowest,
};
