/// Discrete life-state of a character, derived from effective HP.
///
/// `Dead` is not terminal: a revive (or HP rising above zero) leaves it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ConditionKind {
    #[default]
    Healthy,
    Knockout,
    Limbo,
    Dead,
}

impl ConditionKind {
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// A condition change produced by one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionTransition {
    pub from: ConditionKind,
    pub to: ConditionKind,
}

impl ConditionTransition {
    /// Human-readable diagnostic line for the named character.
    pub fn describe(&self, character: &str) -> String {
        format!("character '{character}' is now {}", self.to)
    }
}
