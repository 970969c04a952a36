//! Condition state machine.
//!
//! The engine owns the current condition and an optional pending request.
//! [`ConditionEngine::evaluate`] reconciles both against effective HP and may
//! write HP back into the table while doing so.
//!
//! # Evaluation order
//!
//! 1. A request equal to the current condition is dropped.
//! 2. A pending request forces HP to match it: `Dead` drives effective HP to
//!    0, any living condition lifts non-positive HP to the revive value.
//! 3. A living character at HP ≤ 0 dies, whatever was requested.
//! 4. A dead character with HP > 0 and no request asks for the revive
//!    condition.
//! 5. Any remaining request becomes the current condition.

use super::kind::{ConditionKind, ConditionTransition};
use crate::stats::{StatKind, StatTable};

/// Stat that drives the condition.
const HP: StatKind = StatKind::Hp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConditionEngine {
    current: ConditionKind,
    pending: Option<ConditionKind>,
    revive_condition: ConditionKind,
    revive_percent: f32,
}

impl ConditionEngine {
    pub const DEFAULT_REVIVE_PERCENT: f32 = 0.1;

    pub fn new(revive_condition: ConditionKind, revive_percent: f32) -> Self {
        Self {
            current: ConditionKind::Healthy,
            pending: None,
            revive_condition,
            revive_percent,
        }
    }

    pub fn current(&self) -> ConditionKind {
        self.current
    }

    pub fn pending(&self) -> Option<ConditionKind> {
        self.pending
    }

    pub fn revive_condition(&self) -> ConditionKind {
        self.revive_condition
    }

    pub fn revive_percent(&self) -> f32 {
        self.revive_percent
    }

    pub fn is_dead(&self) -> bool {
        self.current.is_dead()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Queue a forced transition for the next evaluation.
    pub fn request(&mut self, condition: ConditionKind) {
        self.pending = Some(condition);
    }

    /// Drop any queued request.
    pub fn cancel_request(&mut self) {
        self.pending = None;
    }

    /// Overwrite the current condition without evaluating, for loading saved
    /// characters. Clears any pending request.
    pub fn restore(&mut self, condition: ConditionKind) {
        self.current = condition;
        self.pending = None;
    }

    /// HP restored by a revive at `percent` of base HP: `max(1, round(base × percent))`.
    pub fn revive_hp(table: &StatTable, percent: f32) -> f32 {
        (table.base(HP) * percent).round().max(1.0)
    }

    /// Reconcile the condition with the table's effective HP.
    ///
    /// Returns the transition that happened, if any. Calling this twice with no
    /// stat change in between never transitions on the second call.
    pub fn evaluate(&mut self, table: &mut StatTable) -> Option<ConditionTransition> {
        if self.pending == Some(self.current) {
            self.pending = None;
        }

        if let Some(pending) = self.pending {
            let hp = table.effective(HP);
            if pending.is_dead() && hp != 0.0 {
                let _ = table.set_effective(HP, 0.0);
            } else if !pending.is_dead() && hp <= 0.0 {
                let revive_hp = Self::revive_hp(table, self.revive_percent);
                let _ = table.set_effective(HP, revive_hp);
            }
        }

        let hp = table.effective(HP);
        if !self.current.is_dead() && hp <= 0.0 {
            self.pending = None;
            return Some(self.transition_to(ConditionKind::Dead));
        }

        if self.current.is_dead() && hp > 0.0 && self.pending.is_none() {
            self.pending = Some(self.revive_condition);
        }

        match self.pending.take() {
            Some(next) if next != self.current => Some(self.transition_to(next)),
            _ => None,
        }
    }

    fn transition_to(&mut self, to: ConditionKind) -> ConditionTransition {
        let from = std::mem::replace(&mut self.current, to);
        tracing::trace!(%from, %to, "condition transition");
        ConditionTransition { from, to }
    }
}

impl Default for ConditionEngine {
    fn default() -> Self {
        Self::new(ConditionKind::Healthy, Self::DEFAULT_REVIVE_PERCENT)
    }
}
