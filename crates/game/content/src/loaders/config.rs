//! Engine configuration loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use charstats_core::{ConditionKind, DiceSpec, StatKind, StatLimits, StatRules, StatsConfig};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`StatsConfig`] from TOML files.
pub struct ConfigLoader;

/// On-disk shape of the config. Names are resolved case-insensitively.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StatsConfigSpec {
    revive_percent: Option<f32>,
    revive_condition: Option<String>,
    dice: Option<DiceSpec>,
    xp_per_level: Option<u32>,
    rules: RulesSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RulesSpec {
    positive_base: Option<Vec<String>>,
    immutable: Option<Vec<String>>,
    condition_stats: Option<Vec<String>>,
    regenerating: Option<Vec<String>>,
    default_limits: BTreeMap<String, StatLimits>,
}

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`StatsConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<StatsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// The configuration shipped with this crate.
    pub fn bundled() -> LoadResult<StatsConfig> {
        Self::parse(include_str!("../../data/stats.toml"))
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<StatsConfig> {
        let spec: StatsConfigSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        let config = Self::resolve(spec)?;
        tracing::debug!(
            revive_percent = config.revive_percent,
            revive_condition = %config.revive_condition,
            "loaded stats config"
        );
        Ok(config)
    }

    fn resolve(spec: StatsConfigSpec) -> LoadResult<StatsConfig> {
        let defaults = StatsConfig::default();

        let revive_percent = spec.revive_percent.unwrap_or(defaults.revive_percent);
        if !revive_percent.is_finite() || revive_percent <= 0.0 {
            anyhow::bail!("revive_percent must be a positive number, got {revive_percent}");
        }

        let revive_condition = match spec.revive_condition {
            Some(name) => parse_condition(&name)?,
            None => defaults.revive_condition,
        };
        if revive_condition.is_dead() {
            anyhow::bail!("revive_condition cannot be {revive_condition}");
        }

        let dice = spec.dice.unwrap_or(defaults.dice);
        if dice.sides == 0 || i32::try_from(dice.sides).is_err() {
            anyhow::bail!("dice.sides must be between 1 and {}, got {}", i32::MAX, dice.sides);
        }
        if dice.drop_lowest >= dice.count {
            anyhow::bail!(
                "dice.drop_lowest ({}) must be less than dice.count ({})",
                dice.drop_lowest,
                dice.count
            );
        }

        let rules = Self::resolve_rules(spec.rules, &defaults.rules)?;

        Ok(StatsConfig {
            revive_percent,
            revive_condition,
            dice,
            xp_per_level: spec.xp_per_level.unwrap_or(defaults.xp_per_level),
            rules: rules.into(),
        })
    }

    fn resolve_rules(spec: RulesSpec, defaults: &StatRules) -> LoadResult<StatRules> {
        let set = |names: Option<Vec<String>>, fallback: &BTreeSet<StatKind>| match names {
            Some(names) => parse_stat_set(&names),
            None => Ok(fallback.clone()),
        };

        let mut default_limits = BTreeMap::new();
        for (name, limits) in spec.default_limits {
            let finite = |bound: Option<f32>| bound.is_none_or(f32::is_finite);
            if !finite(limits.lower) || !finite(limits.upper) {
                anyhow::bail!("default limits for '{name}' must be finite");
            }
            default_limits.insert(parse_stat(&name)?, limits);
        }

        Ok(StatRules {
            positive_base: set(spec.positive_base, &defaults.positive_base)?,
            immutable: set(spec.immutable, &defaults.immutable)?,
            condition_stats: set(spec.condition_stats, &defaults.condition_stats)?,
            regenerating: set(spec.regenerating, &defaults.regenerating)?,
            default_limits,
        })
    }
}

fn parse_stat(name: &str) -> LoadResult<StatKind> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("unknown stat '{}'", name))
}

fn parse_stat_set(names: &[String]) -> LoadResult<BTreeSet<StatKind>> {
    names.iter().map(|name| parse_stat(name)).collect()
}

fn parse_condition(name: &str) -> LoadResult<ConditionKind> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("unknown condition '{}'", name))
}
