//! Sparse per-character stat storage.
//!
//! A [`StatTable`] maps [`StatKind`] to [`StatRecord`]. Keys appear lazily:
//! reads of an absent kind degrade to a zero record (or to the positive-base
//! default for kinds that require one), and writes create the record on demand.
//!
//! The table enforces the per-kind [`StatRules`] (immutability, positive base,
//! limit clamping) but does not know about conditions. Every mutator reports a
//! [`WriteOutcome`] so the owner can decide whether the condition has to be
//! re-evaluated.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::dice::DiceSpec;
use super::kind::StatKind;
use super::record::{StatLimits, StatRecord};
use super::rules::StatRules;
use crate::env::RandomSource;
use crate::error::{RecordField, SnapshotError};

/// Result of a single table mutation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was written.
    Written,
    /// The write would not change anything and was skipped.
    Unchanged,
    /// The write was refused (immutable stat or non-finite input).
    Rejected,
}

impl WriteOutcome {
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Ordered `(kind, record)` pairs describing a table's full contents.
pub type StatSnapshot = Vec<(StatKind, StatRecord)>;

/// Stat storage owned by exactly one character.
#[derive(Clone, Debug, PartialEq)]
pub struct StatTable {
    records: BTreeMap<StatKind, StatRecord>,
    rules: Arc<StatRules>,
}

impl StatTable {
    /// Empty table with default rules.
    pub fn new() -> Self {
        Self::with_rules(Arc::new(StatRules::default()))
    }

    /// Empty table sharing the given rules.
    pub fn with_rules(rules: Arc<StatRules>) -> Self {
        Self {
            records: BTreeMap::new(),
            rules,
        }
    }

    pub fn rules(&self) -> &StatRules {
        &self.rules
    }

    /// Shared handle to the rules, for building sibling tables.
    pub fn shared_rules(&self) -> Arc<StatRules> {
        Arc::clone(&self.rules)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// The stored record for `kind`, if one has been materialized.
    pub fn record(&self, kind: StatKind) -> Option<&StatRecord> {
        self.records.get(&kind)
    }

    pub fn contains(&self, kind: StatKind) -> bool {
        self.records.contains_key(&kind)
    }

    /// Stored records in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &StatRecord)> {
        self.records.iter().map(|(kind, record)| (*kind, record))
    }

    /// Base value; absent kinds read 0, or 1 if they require a positive base.
    pub fn base(&self, kind: StatKind) -> f32 {
        match self.records.get(&kind) {
            Some(record) => record.base,
            None => self.default_record(kind).base,
        }
    }

    /// Modifier; absent kinds read 0.
    pub fn modifier(&self, kind: StatKind) -> f32 {
        self.records.get(&kind).map_or(0.0, |record| record.modifier)
    }

    /// `base + modifier`.
    pub fn effective(&self, kind: StatKind) -> f32 {
        self.base(kind) + self.modifier(kind)
    }

    /// Lower modifier limit: the record's own, else the rules' default.
    pub fn lower_limit(&self, kind: StatKind) -> Option<f32> {
        self.records
            .get(&kind)
            .and_then(|record| record.limits.lower)
            .or_else(|| self.rules.default_limits(kind).lower)
    }

    /// Upper modifier limit: the record's own, else the rules' default.
    pub fn upper_limit(&self, kind: StatKind) -> Option<f32> {
        self.records
            .get(&kind)
            .and_then(|record| record.limits.upper)
            .or_else(|| self.rules.default_limits(kind).upper)
    }

    /// `base + upper_limit`, or `None` when unbounded above.
    pub fn max_effective(&self, kind: StatKind) -> Option<f32> {
        self.upper_limit(kind).map(|upper| self.base(kind) + upper)
    }

    /// `base + lower_limit`, or `None` when unbounded below.
    pub fn min_effective(&self, kind: StatKind) -> Option<f32> {
        self.lower_limit(kind).map(|lower| self.base(kind) + lower)
    }

    /// Whether a write to `kind` should trigger condition re-evaluation.
    pub fn needs_evaluation(&self, kind: StatKind, outcome: WriteOutcome) -> bool {
        outcome.is_written() && self.rules.affects_condition(kind)
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Set the base value.
    ///
    /// Positive-base kinds coerce non-positive values to 1. Any existing
    /// modifier and limits are kept.
    pub fn set_base(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        if self.rules.is_immutable(kind) || !value.is_finite() {
            return WriteOutcome::Rejected;
        }
        let value = if self.rules.requires_positive_base(kind) && value <= 0.0 {
            StatRules::POSITIVE_BASE_DEFAULT
        } else {
            value
        };
        self.entry(kind).base = value;
        WriteOutcome::Written
    }

    /// Set the modifier, clamped into `[lower_limit - base, upper_limit]`.
    ///
    /// The lower limit is measured from an effective value of zero, hence the
    /// base offset; the upper limit bounds the modifier directly. When the
    /// bounds cross, the lower bound wins. A clamped value equal to the current
    /// modifier is not written.
    pub fn set_modifier(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        if self.rules.is_immutable(kind) || !value.is_finite() {
            return WriteOutcome::Rejected;
        }
        let clamped = self.clamp_modifier(kind, value);
        if clamped == self.modifier(kind) {
            return WriteOutcome::Unchanged;
        }
        self.entry(kind).modifier = clamped;
        WriteOutcome::Written
    }

    /// Add `delta` to the current modifier.
    pub fn modify(&mut self, kind: StatKind, delta: f32) -> WriteOutcome {
        self.set_modifier(kind, self.modifier(kind) + delta)
    }

    /// Set the modifier so that the effective value becomes `value`.
    pub fn set_effective(&mut self, kind: StatKind, value: f32) -> WriteOutcome {
        self.set_modifier(kind, value - self.base(kind))
    }

    /// Reset the modifier to zero if the record exists.
    pub fn clear_modifier(&mut self, kind: StatKind) -> WriteOutcome {
        if !self.contains(kind) {
            return WriteOutcome::Unchanged;
        }
        self.set_modifier(kind, 0.0)
    }

    /// Replace the record's own limits and re-clamp its modifier.
    pub fn set_limits(&mut self, kind: StatKind, limits: StatLimits) -> WriteOutcome {
        let finite = |bound: Option<f32>| bound.is_none_or(f32::is_finite);
        if self.rules.is_immutable(kind) || !finite(limits.lower) || !finite(limits.upper) {
            return WriteOutcome::Rejected;
        }
        let record = self.entry(kind);
        let limits_changed = record.limits != limits;
        record.limits = limits;

        let current = record.modifier;
        let clamped = self.clamp_modifier(kind, current);
        if clamped != current {
            self.entry(kind).modifier = clamped;
            return WriteOutcome::Written;
        }
        if limits_changed {
            WriteOutcome::Written
        } else {
            WriteOutcome::Unchanged
        }
    }

    /// Roll a fresh base for every kind. Returns the kinds that were written.
    pub fn randomize(&mut self, rng: &mut impl RandomSource, dice: DiceSpec) -> Vec<StatKind> {
        let mut written = Vec::new();
        for kind in StatKind::iter() {
            let rolled = dice.roll(rng) as f32;
            if self.set_base(kind, rolled).is_written() {
                written.push(kind);
            }
        }
        written
    }

    /// Set every base to zero (positive-base kinds land on 1).
    /// Returns the kinds that were written.
    pub fn zero_all(&mut self) -> Vec<StatKind> {
        let mut written = Vec::new();
        for kind in StatKind::iter() {
            if self.set_base(kind, 0.0).is_written() {
                written.push(kind);
            }
        }
        written
    }

    /// Insert default records for every absent positive-base kind.
    pub fn materialize(&mut self) {
        let missing: Vec<StatKind> = self
            .rules
            .positive_base
            .iter()
            .copied()
            .filter(|kind| !self.records.contains_key(kind))
            .collect();
        for kind in missing {
            self.entry(kind);
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------------

    /// Every stored record, ordered by kind.
    pub fn snapshot(&self) -> StatSnapshot {
        self.records
            .iter()
            .map(|(kind, record)| (*kind, *record))
            .collect()
    }

    /// Replace the table contents with `entries`.
    ///
    /// Records are normalized the way live writes are: positive-base kinds
    /// get a base of at least 1 and modifiers are clamped to their limits.
    /// On error the table is left untouched.
    pub fn restore<I>(&mut self, entries: I) -> Result<(), SnapshotError>
    where
        I: IntoIterator<Item = (StatKind, StatRecord)>,
    {
        let mut seen = BTreeSet::new();
        let mut staged = Vec::new();
        for (kind, record) in entries {
            if !seen.insert(kind) {
                return Err(SnapshotError::DuplicateStat(kind));
            }
            check_finite(kind, &record)?;
            staged.push((kind, record));
        }

        let before = self.records.len();
        self.records.clear();
        for (kind, mut record) in staged {
            if self.rules.requires_positive_base(kind) && record.base <= 0.0 {
                tracing::debug!(stat = %kind, base = record.base, "coercing restored base");
                record.base = StatRules::POSITIVE_BASE_DEFAULT;
            }
            self.records.insert(kind, record);
            let clamped = self.clamp_modifier(kind, record.modifier);
            if clamped != record.modifier {
                tracing::debug!(
                    stat = %kind,
                    modifier = record.modifier,
                    clamped,
                    "clamping restored modifier"
                );
                self.entry(kind).modifier = clamped;
            }
        }
        tracing::trace!(
            before,
            after = self.records.len(),
            "stat table restored"
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn default_record(&self, kind: StatKind) -> StatRecord {
        if self.rules.requires_positive_base(kind) {
            StatRecord::with_base(StatRules::POSITIVE_BASE_DEFAULT)
        } else {
            StatRecord::default()
        }
    }

    fn entry(&mut self, kind: StatKind) -> &mut StatRecord {
        let default = self.default_record(kind);
        self.records.entry(kind).or_insert(default)
    }

    fn clamp_modifier(&self, kind: StatKind, value: f32) -> f32 {
        let mut clamped = value;
        if let Some(upper) = self.upper_limit(kind) {
            clamped = clamped.min(upper);
        }
        if let Some(lower) = self.lower_limit(kind) {
            clamped = clamped.max(lower - self.base(kind));
        }
        clamped
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite(kind: StatKind, record: &StatRecord) -> Result<(), SnapshotError> {
    let fields = [
        (RecordField::Base, Some(record.base)),
        (RecordField::Modifier, Some(record.modifier)),
        (RecordField::LowerLimit, record.limits.lower),
        (RecordField::UpperLimit, record.limits.upper),
    ];
    for (field, value) in fields {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(SnapshotError::NonFinite { kind, field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn absent_kinds_read_as_defaults() {
        let table = StatTable::new();
        assert_eq!(table.base(StatKind::Str), 0.0);
        assert_eq!(table.modifier(StatKind::Str), 0.0);
        assert_eq!(table.base(StatKind::Hp), 1.0);
        assert_eq!(table.effective(StatKind::Hp), 1.0);
        assert!(!table.contains(StatKind::Hp));
        assert_eq!(table.lower_limit(StatKind::Str), None);
        assert_eq!(table.max_effective(StatKind::Str), None);
    }

    #[test]
    fn set_base_keeps_existing_modifier() {
        let mut table = StatTable::new();
        assert!(table.set_modifier(StatKind::Str, 3.0).is_written());
        assert!(table.set_base(StatKind::Str, 12.0).is_written());
        assert_eq!(table.modifier(StatKind::Str), 3.0);
        assert_eq!(table.effective(StatKind::Str), 15.0);
    }

    #[test]
    fn positive_base_is_coerced() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Hp, -4.0);
        assert_eq!(table.base(StatKind::Hp), 1.0);
        let _ = table.set_base(StatKind::Hp, 0.0);
        assert_eq!(table.base(StatKind::Hp), 1.0);
    }

    #[test]
    fn immutable_stats_ignore_writes() {
        let rules = StatRules::default().with_immutable(StatKind::Str);
        let mut table = StatTable::with_rules(Arc::new(rules));
        assert_eq!(table.set_base(StatKind::Str, 50.0), WriteOutcome::Rejected);
        assert_eq!(table.modify(StatKind::Str, 2.0), WriteOutcome::Rejected);
        assert_eq!(
            table.set_limits(StatKind::Str, StatLimits::new(Some(0.0), None)),
            WriteOutcome::Rejected
        );
        assert_eq!(table.base(StatKind::Str), 0.0);
        assert!(!table.contains(StatKind::Str));
    }

    #[test]
    fn modifier_is_clamped_to_limits() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Str, 10.0);
        let _ = table.set_limits(StatKind::Str, StatLimits::new(Some(4.0), Some(5.0)));

        let _ = table.set_modifier(StatKind::Str, 9.0);
        assert_eq!(table.modifier(StatKind::Str), 5.0);

        // Lower bound is relative to an effective value of zero: 4 - 10 = -6.
        let _ = table.set_modifier(StatKind::Str, -20.0);
        assert_eq!(table.modifier(StatKind::Str), -6.0);
        assert_eq!(table.effective(StatKind::Str), 4.0);

        assert_eq!(table.max_effective(StatKind::Str), Some(15.0));
        assert_eq!(table.min_effective(StatKind::Str), Some(14.0));
    }

    #[test]
    fn setting_limits_reclamps_modifier() {
        let mut table = StatTable::new();
        let _ = table.set_modifier(StatKind::Dex, 8.0);
        let outcome = table.set_limits(StatKind::Dex, StatLimits::new(None, Some(2.0)));
        assert!(outcome.is_written());
        assert_eq!(table.modifier(StatKind::Dex), 2.0);
        assert_eq!(
            table.set_limits(StatKind::Dex, StatLimits::new(None, Some(2.0))),
            WriteOutcome::Unchanged
        );
    }

    #[test]
    fn default_limits_apply_when_record_has_none() {
        let rules = StatRules::default()
            .with_default_limits(StatKind::Spd, StatLimits::new(None, Some(3.0)));
        let mut table = StatTable::with_rules(Arc::new(rules));
        let _ = table.modify(StatKind::Spd, 10.0);
        assert_eq!(table.modifier(StatKind::Spd), 3.0);
        assert_eq!(table.upper_limit(StatKind::Spd), Some(3.0));

        // Own limit overrides the default per bound.
        let _ = table.set_limits(StatKind::Spd, StatLimits::new(None, Some(6.0)));
        let _ = table.modify(StatKind::Spd, 10.0);
        assert_eq!(table.modifier(StatKind::Spd), 6.0);
    }

    #[test]
    fn equal_modifier_is_not_rewritten() {
        let mut table = StatTable::new();
        assert_eq!(table.set_modifier(StatKind::Mp, 0.0), WriteOutcome::Unchanged);
        assert!(!table.contains(StatKind::Mp));
        let _ = table.set_modifier(StatKind::Mp, 2.0);
        assert_eq!(table.set_modifier(StatKind::Mp, 2.0), WriteOutcome::Unchanged);
    }

    #[test]
    fn set_effective_and_clear_modifier() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Int, 12.0);
        let _ = table.set_effective(StatKind::Int, 7.5);
        assert!(close(table.effective(StatKind::Int), 7.5));
        assert!(close(table.modifier(StatKind::Int), -4.5));

        let _ = table.clear_modifier(StatKind::Int);
        assert_eq!(table.modifier(StatKind::Int), 0.0);
        assert_eq!(table.clear_modifier(StatKind::Mp), WriteOutcome::Unchanged);
        assert!(!table.contains(StatKind::Mp));
    }

    #[test]
    fn non_finite_writes_are_rejected() {
        let mut table = StatTable::new();
        assert_eq!(table.set_base(StatKind::Str, f32::NAN), WriteOutcome::Rejected);
        assert_eq!(
            table.set_modifier(StatKind::Str, f32::INFINITY),
            WriteOutcome::Rejected
        );
        assert!(!table.contains(StatKind::Str));
    }

    #[test]
    fn randomize_rolls_every_kind() {
        let mut table = StatTable::new();
        let mut rng = SequenceRng::new([6, 5, 4, 1]);
        let written = table.randomize(&mut rng, DiceSpec::default());
        assert_eq!(written, StatKind::ALL.to_vec());
        assert_eq!(rng.draws(), 4 * StatKind::ALL.len());
        for kind in StatKind::iter() {
            assert_eq!(table.base(kind), 15.0);
        }
    }

    #[test]
    fn zero_all_keeps_positive_base() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Str, 14.0);
        let _ = table.set_base(StatKind::Hp, 30.0);
        let written = table.zero_all();
        assert_eq!(written.len(), StatKind::ALL.len());
        assert_eq!(table.base(StatKind::Str), 0.0);
        assert_eq!(table.base(StatKind::Hp), 1.0);
    }

    #[test]
    fn materialize_inserts_positive_base_records() {
        let mut table = StatTable::new();
        table.materialize();
        assert_eq!(table.record(StatKind::Hp), Some(&StatRecord::with_base(1.0)));
        assert!(!table.contains(StatKind::Str));
    }

    #[test]
    fn snapshot_is_ordered_and_restorable() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Int, 9.0);
        let _ = table.set_base(StatKind::Hp, 20.0);
        let _ = table.modify(StatKind::Hp, -5.0);

        let snapshot = table.snapshot();
        let kinds: Vec<StatKind> = snapshot.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, vec![StatKind::Hp, StatKind::Int]);

        let mut other = StatTable::new();
        other.restore(snapshot).unwrap();
        assert_eq!(other, table);
    }

    #[test]
    fn restore_normalizes_records() {
        let mut table = StatTable::new();
        table
            .restore([
                (StatKind::Hp, StatRecord::with_base(-3.0)),
                (
                    StatKind::Str,
                    StatRecord::new(10.0, 9.0, StatLimits::new(None, Some(2.0))),
                ),
            ])
            .unwrap();
        assert_eq!(table.base(StatKind::Hp), 1.0);
        assert_eq!(table.modifier(StatKind::Str), 2.0);
    }

    #[test]
    fn crossed_limits_favor_the_lower_bound() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Str, 10.0);
        // Lower needs a modifier of at least 10, upper allows at most 5.
        let _ = table.set_limits(StatKind::Str, StatLimits::new(Some(20.0), Some(5.0)));
        assert_eq!(table.modifier(StatKind::Str), 10.0);

        assert_eq!(table.set_modifier(StatKind::Str, 3.0), WriteOutcome::Unchanged);
        assert_eq!(table.set_modifier(StatKind::Str, 50.0), WriteOutcome::Unchanged);
        assert_eq!(table.modifier(StatKind::Str), 10.0);
        assert_eq!(table.effective(StatKind::Str), 20.0);
    }

    #[test]
    fn restore_rejects_bad_input_without_touching_table() {
        let mut table = StatTable::new();
        let _ = table.set_base(StatKind::Dex, 11.0);

        let duplicate = table.restore([
            (StatKind::Str, StatRecord::with_base(1.0)),
            (StatKind::Str, StatRecord::with_base(2.0)),
        ]);
        assert_eq!(duplicate, Err(SnapshotError::DuplicateStat(StatKind::Str)));

        let nan = table.restore([(
            StatKind::Mp,
            StatRecord::new(1.0, f32::NAN, StatLimits::UNBOUNDED),
        )]);
        assert_eq!(
            nan,
            Err(SnapshotError::NonFinite {
                kind: StatKind::Mp,
                field: RecordField::Modifier
            })
        );
        assert_eq!(table.base(StatKind::Dex), 11.0);
    }
}
