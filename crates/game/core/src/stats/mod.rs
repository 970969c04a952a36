//! Stat storage and generation.
//!
//! # Layout
//!
//! ```text
//! [ StatKind ]  closed set of stat identifiers
//!      ↓
//! [ StatRecord ]  base + modifier + optional limits
//!      ↓
//! [ StatTable ]  sparse kind → record map, enforces StatRules
//! ```
//!
//! Dice rolling feeds [`StatTable::randomize`]; timed modifiers sit on top of
//! the table and are reverted through ordinary modifier writes.

pub mod dice;
pub mod kind;
pub mod record;
pub mod rules;
pub mod table;
pub mod timed;

pub use dice::{DiceSpec, roll_dice_drop_lowest};
pub use kind::StatKind;
pub use record::{StatLimits, StatRecord};
pub use rules::StatRules;
pub use table::{StatSnapshot, StatTable, WriteOutcome};
pub use timed::{TimedModifier, TimedModifiers};
