//! Character condition: the discrete life-state derived from HP.

pub mod engine;
pub mod kind;
pub mod sink;

pub use engine::ConditionEngine;
pub use kind::{ConditionKind, ConditionTransition};
pub use sink::{DiagnosticSink, MemorySink, NullSink, TracingSink};
