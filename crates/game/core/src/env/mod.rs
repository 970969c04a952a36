//! Capabilities the engine consumes from its host.
//!
//! The only one today is randomness for stat generation; diagnostics live with
//! the condition engine that emits them.

pub mod rng;

pub use rng::{PcgRng, RandomSource, SequenceRng};
