//! Temporary stat boosts and debuffs measured in turns.
//!
//! A timed modifier records the delta that was actually applied to a stat's
//! modifier (after clamping) and how many turns remain. When the count reaches
//! zero the owner reverts the delta with an ordinary modifier write.
//!
//! Timed modifiers are transient and never part of a snapshot.

use super::kind::StatKind;

/// One active temporary modifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedModifier {
    pub kind: StatKind,
    /// Delta applied to the stat's modifier when this was added.
    pub delta: f32,
    /// Turns left before the delta is reverted.
    pub remaining: u32,
}

/// Active timed modifiers, in the order they were applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimedModifiers {
    entries: Vec<TimedModifier>,
}

impl TimedModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an applied delta. Zero turns or a zero delta track nothing.
    pub fn push(&mut self, kind: StatKind, delta: f32, turns: u32) -> bool {
        if turns == 0 || delta == 0.0 {
            return false;
        }
        self.entries.push(TimedModifier {
            kind,
            delta,
            remaining: turns,
        });
        true
    }

    /// Advance one turn and remove every entry that ran out.
    ///
    /// Returns the expired entries in application order.
    pub fn tick(&mut self) -> Vec<TimedModifier> {
        let mut expired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining -= 1;
            if entry.remaining == 0 {
                expired.push(*entry);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Active entries affecting `kind`.
    pub fn for_kind(&self, kind: StatKind) -> impl Iterator<Item = &TimedModifier> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Sum of active deltas on `kind`.
    pub fn total(&self, kind: StatKind) -> f32 {
        self.for_kind(kind).map(|entry| entry.delta).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedModifier> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
