//! Character façade: identity, stats and condition in one owner.
//!
//! All stat writes go through [`Character`] so that writes to
//! condition-relevant stats re-evaluate the condition before returning. The
//! evaluation runs synchronously and may write HP back into the table.

use crate::condition::{
    ConditionEngine, ConditionKind, ConditionTransition, DiagnosticSink, TracingSink,
};
use crate::config::StatsConfig;
use crate::env::RandomSource;
use crate::error::SnapshotError;
use crate::stats::{
    DiceSpec, StatKind, StatLimits, StatRecord, StatSnapshot, StatTable, TimedModifier,
    TimedModifiers, WriteOutcome,
};

const HP: StatKind = StatKind::Hp;

/// A named character with level, experience, stats and a life condition.
#[derive(Clone, Debug)]
pub struct Character<S: DiagnosticSink = TracingSink> {
    name: String,
    level: u32,
    xp: u32,
    stats: StatTable,
    condition: ConditionEngine,
    timed: TimedModifiers,
    dice: DiceSpec,
    xp_per_level: u32,
    sink: S,
}

impl Character<TracingSink> {
    /// Create a level-1 character that logs transitions through `tracing`.
    pub fn new(name: impl Into<String>, config: &StatsConfig) -> Self {
        Self::with_sink(name, config, TracingSink)
    }
}

impl<S: DiagnosticSink> Character<S> {
    /// Create a level-1 character reporting transitions to `sink`.
    ///
    /// Positive-base stats are materialized and the condition is evaluated
    /// once, so a fresh character starts `Healthy`.
    pub fn with_sink(name: impl Into<String>, config: &StatsConfig, sink: S) -> Self {
        let mut character = Self {
            name: name.into(),
            level: 1,
            xp: 0,
            stats: StatTable::with_rules(config.rules.clone()),
            condition: config.condition_engine(),
            timed: TimedModifiers::new(),
            dice: config.dice,
            xp_per_level: config.xp_per_level,
            sink,
        };
        character.stats.materialize();
        character.evaluate();
        character
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn set_xp(&mut self, xp: u32) {
        self.xp = xp;
    }

    /// Add experience and level up while the threshold is met.
    ///
    /// Leaving level `n` costs `n × xp_per_level`. Returns the levels gained.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        if self.xp_per_level == 0 {
            return 0;
        }

        let mut gained = 0;
        loop {
            let threshold = self.level.max(1).saturating_mul(self.xp_per_level);
            if self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            tracing::debug!(character = %self.name, level = self.level, gained, "level up");
        }
        gained
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn stats(&self) -> &StatTable {
        &self.stats
    }

    pub fn condition(&self) -> ConditionKind {
        self.condition.current()
    }

    pub fn pending_condition(&self) -> Option<ConditionKind> {
        self.condition.pending()
    }

    pub fn is_dead(&self) -> bool {
        self.condition.is_dead()
    }

    pub fn is_alive(&self) -> bool {
        self.condition.is_alive()
    }

    pub fn timed_modifiers(&self) -> &TimedModifiers {
        &self.timed
    }

    /// Effective HP as a fraction of base HP, clamped to `[0, 1]`.
    pub fn hp_fraction(&self) -> f32 {
        let base = self.stats.base(HP);
        if base <= 0.0 {
            return 0.0;
        }
        (self.stats.effective(HP) / base).clamp(0.0, 1.0)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ------------------------------------------------------------------------
    // Stat writes
    // ------------------------------------------------------------------------

    pub fn set_base(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        let outcome = self.stats.set_base(kind, value);
        self.after_write(kind, outcome)
    }

    pub fn set_modifier(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        let outcome = self.stats.set_modifier(kind, value);
        self.after_write(kind, outcome)
    }

    pub fn modify(&mut self, kind: StatKind, delta: f32) -> WriteOutcome {
        let outcome = self.stats.modify(kind, delta);
        self.after_write(kind, outcome)
    }

    pub fn set_effective(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        let outcome = self.stats.set_effective(kind, value);
        self.after_write(kind, outcome)
    }

    pub fn clear_modifier(&mut self, kind: StatKind) -> WriteOutcome {
        let outcome = self.stats.clear_modifier(kind);
        self.after_write(kind, outcome)
    }

    pub fn set_limits(&mut self, kind: StatKind, limits: StatLimits) -> WriteOutcome {
        let outcome = self.stats.set_limits(kind, limits);
        self.after_write(kind, outcome)
    }

    /// Roll every base with the configured dice.
    pub fn randomize(&mut self, rng: &mut impl RandomSource) {
        self.randomize_with(rng, self.dice);
    }

    /// Roll every base with explicit dice.
    pub fn randomize_with(&mut self, rng: &mut impl RandomSource, dice: DiceSpec) {
        let written = self.stats.randomize(rng, dice);
        self.after_bulk_write(&written);
    }

    /// Set every base to zero; positive-base stats land on 1.
    pub fn zero_all(&mut self) {
        let written = self.stats.zero_all();
        self.after_bulk_write(&written);
    }

    // ------------------------------------------------------------------------
    // HP and condition
    // ------------------------------------------------------------------------

    pub fn heal(&mut self, amount: f32) -> WriteOutcome {
        self.modify(HP, amount)
    }

    pub fn damage(&mut self, amount: f32) -> WriteOutcome {
        self.modify(HP, -amount)
    }

    /// Remove every HP modifier, restoring effective HP to base.
    pub fn full_heal(&mut self) -> WriteOutcome {
        self.clear_modifier(HP)
    }

    /// Drive effective HP to zero.
    pub fn kill(&mut self) -> WriteOutcome {
        self.set_effective(HP, 0.0)
    }

    /// Revive with the configured percent into the configured condition.
    pub fn revive(&mut self) -> Option<ConditionTransition> {
        self.revive_with(
            self.condition.revive_percent(),
            self.condition.revive_condition(),
        )
    }

    /// Revive into `target` with `percent` of base HP.
    ///
    /// Does nothing unless the character is dead, `percent` is non-zero and
    /// finite, and `target` is a living condition. If HP cannot be written
    /// (immutable HP) the request is withdrawn and nothing changes.
    pub fn revive_with(
        &mut self,
        percent: f32,
        target: ConditionKind,
    ) -> Option<ConditionTransition> {
        if !self.is_dead() || percent == 0.0 || !percent.is_finite() || target.is_dead() {
            return None;
        }
        self.condition.request(target);
        let revive_hp = ConditionEngine::revive_hp(&self.stats, percent);
        if !self.stats.set_effective(HP, revive_hp).is_written() {
            self.condition.cancel_request();
            return None;
        }
        self.evaluate()
    }

    /// Ask for a condition and reconcile HP with it immediately.
    pub fn request_condition(&mut self, condition: ConditionKind) -> Option<ConditionTransition> {
        self.condition.request(condition);
        self.evaluate()
    }

    /// Re-run condition evaluation, reporting any transition to the sink.
    pub fn evaluate(&mut self) -> Option<ConditionTransition> {
        let transition = self.condition.evaluate(&mut self.stats)?;
        self.sink.emit(&self.name, &transition);
        Some(transition)
    }

    // ------------------------------------------------------------------------
    // Timed modifiers and regeneration
    // ------------------------------------------------------------------------

    /// Apply `delta` to `kind`'s modifier for `turns` turns.
    ///
    /// The delta actually applied (after clamping) is what gets reverted on
    /// expiry. Zero turns applies nothing.
    pub fn apply_timed(&mut self, kind: StatKind, delta: f32, turns: u32) -> WriteOutcome {
        if turns == 0 {
            return WriteOutcome::Unchanged;
        }
        let before = self.stats.modifier(kind);
        let outcome = self.modify(kind, delta);
        if outcome.is_written() {
            let applied = self.stats.modifier(kind) - before;
            self.timed.push(kind, applied, turns);
        }
        outcome
    }

    /// Advance one turn, reverting every timed modifier that expires.
    pub fn advance_turn(&mut self) -> Vec<TimedModifier> {
        let expired = self.timed.tick();
        for entry in &expired {
            tracing::trace!(stat = %entry.kind, delta = entry.delta, "timed modifier expired");
            let _ = self.modify(entry.kind, -entry.delta);
        }
        expired
    }

    /// Recover `fraction` of base on every regenerating stat with a negative
    /// modifier, never past zero. Dead characters do not regenerate.
    pub fn regenerate(&mut self, fraction: f32) {
        if self.is_dead() || !fraction.is_finite() || fraction <= 0.0 {
            return;
        }
        for kind in StatKind::iter() {
            if !self.stats.rules().regenerates(kind) {
                continue;
            }
            let modifier = self.stats.modifier(kind);
            if modifier >= 0.0 {
                continue;
            }
            let recovered = (modifier + fraction * self.stats.base(kind)).min(0.0);
            let _ = self.set_modifier(kind, recovered);
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> StatSnapshot {
        self.stats.snapshot()
    }

    /// Replace the stat table from a snapshot and re-evaluate the condition.
    ///
    /// Timed modifiers are transient and are dropped.
    pub fn restore<I>(&mut self, entries: I) -> Result<Option<ConditionTransition>, SnapshotError>
    where
        I: IntoIterator<Item = (StatKind, StatRecord)>,
    {
        self.restore_saved(self.condition(), entries)
    }

    /// Load a saved condition together with its stats, evaluating once.
    ///
    /// Only a disagreement between the saved condition and the saved HP is
    /// reported. On error neither the stats nor the condition change.
    pub fn restore_saved<I>(
        &mut self,
        condition: ConditionKind,
        entries: I,
    ) -> Result<Option<ConditionTransition>, SnapshotError>
    where
        I: IntoIterator<Item = (StatKind, StatRecord)>,
    {
        self.stats.restore(entries)?;
        self.condition.restore(condition);
        self.stats.materialize();
        self.timed.clear();
        Ok(self.evaluate())
    }

    /// Set the stored condition as loaded from a save, then reconcile it.
    pub fn restore_condition(&mut self, condition: ConditionKind) -> Option<ConditionTransition> {
        self.condition.restore(condition);
        self.evaluate()
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn after_write(&mut self, kind: StatKind, outcome: WriteOutcome) -> WriteOutcome {
        if self.stats.needs_evaluation(kind, outcome) {
            self.evaluate();
        }
        outcome
    }

    fn after_bulk_write(&mut self, written: &[StatKind]) {
        if written
            .iter()
            .any(|&kind| self.stats.rules().affects_condition(kind))
        {
            self.evaluate();
        }
    }
}
