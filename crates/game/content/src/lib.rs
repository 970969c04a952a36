//! Data-driven content for the stat engine.
//!
//! This crate provides loaders for TOML/RON data files:
//! - Engine configuration (revive rules, dice, stat policies) via TOML
//! - Character sheets (identity, condition, stat snapshot) via RON
//!
//! All loaders use charstats-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, CharacterSheet, ConfigLoader, LoadResult};
