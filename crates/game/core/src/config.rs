use std::sync::Arc;

use crate::condition::{ConditionEngine, ConditionKind};
use crate::stats::{DiceSpec, StatRules};

/// Tunable parameters shared by every character built from it.
///
/// `rules` sits behind an `Arc` so characters built from one config share one
/// default-limits table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// Fraction of base HP restored by a revive.
    pub revive_percent: f32,
    /// Condition a character revives into when none is requested.
    pub revive_condition: ConditionKind,
    /// Recipe for rolling fresh stats.
    pub dice: DiceSpec,
    /// XP per level step; the threshold for leaving level `n` is `n × xp_per_level`.
    pub xp_per_level: u32,
    pub rules: Arc<StatRules>,
}

impl StatsConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REVIVE_PERCENT: f32 = ConditionEngine::DEFAULT_REVIVE_PERCENT;
    pub const DEFAULT_XP_PER_LEVEL: u32 = 100;

    pub fn new() -> Self {
        Self {
            revive_percent: Self::DEFAULT_REVIVE_PERCENT,
            revive_condition: ConditionKind::Healthy,
            dice: DiceSpec::default(),
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL,
            rules: Arc::new(StatRules::default()),
        }
    }

    pub fn with_rules(rules: StatRules) -> Self {
        Self {
            rules: Arc::new(rules),
            ..Self::new()
        }
    }

    /// Fresh condition engine using this config's revive settings.
    pub fn condition_engine(&self) -> ConditionEngine {
        ConditionEngine::new(self.revive_condition, self.revive_percent)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::new()
    }
}
