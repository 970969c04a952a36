//! Per-kind stat policies.
//!
//! Which stats are frozen, which must keep a positive base, which drive the
//! character's condition and which regenerate are plain set lookups. Default
//! limits are a table keyed by [`StatKind`]; tables share one `StatRules`
//! through an `Arc`, so every table built from the same rules sees the same
//! defaults.

use std::collections::{BTreeMap, BTreeSet};

use super::kind::StatKind;
use super::record::StatLimits;

/// Policy sets and default limits consulted by [`StatTable`](super::StatTable).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatRules {
    /// Stats whose base must stay above zero. Non-positive writes coerce to 1.
    pub positive_base: BTreeSet<StatKind>,
    /// Stats that ignore every mutation.
    pub immutable: BTreeSet<StatKind>,
    /// Stats whose mutation triggers condition re-evaluation.
    pub condition_stats: BTreeSet<StatKind>,
    /// Stats whose negative modifier recovers on regeneration ticks.
    pub regenerating: BTreeSet<StatKind>,
    /// Fallback limits for records that carry none of their own.
    pub default_limits: BTreeMap<StatKind, StatLimits>,
}

impl StatRules {
    /// Base value materialized for absent positive-base stats.
    pub const POSITIVE_BASE_DEFAULT: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            positive_base: BTreeSet::from([StatKind::Hp]),
            immutable: BTreeSet::new(),
            condition_stats: BTreeSet::from([StatKind::Hp]),
            regenerating: BTreeSet::from([StatKind::Hp, StatKind::Mp]),
            default_limits: BTreeMap::new(),
        }
    }

    pub fn requires_positive_base(&self, kind: StatKind) -> bool {
        self.positive_base.contains(&kind)
    }

    pub fn is_immutable(&self, kind: StatKind) -> bool {
        self.immutable.contains(&kind)
    }

    pub fn affects_condition(&self, kind: StatKind) -> bool {
        self.condition_stats.contains(&kind)
    }

    pub fn regenerates(&self, kind: StatKind) -> bool {
        self.regenerating.contains(&kind)
    }

    pub fn default_limits(&self, kind: StatKind) -> StatLimits {
        self.default_limits.get(&kind).copied().unwrap_or_default()
    }

    /// Builder: mark `kind` immutable.
    pub fn with_immutable(mut self, kind: StatKind) -> Self {
        self.immutable.insert(kind);
        self
    }

    /// Builder: set the default limits for `kind`.
    pub fn with_default_limits(mut self, kind: StatKind, limits: StatLimits) -> Self {
        self.default_limits.insert(kind, limits);
        self
    }
}

impl Default for StatRules {
    fn default() -> Self {
        Self::new()
    }
}
