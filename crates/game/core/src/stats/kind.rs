//! Stat identifiers.

/// The closed set of stats tracked for every character.
///
/// - **Hp** (Hit points): life pool; drives the character's condition
/// - **Mp** (Magic points): spell resource
/// - **Spd** (Speed): turn ordering
/// - **Str** (Strength): physical power
/// - **Dex** (Dexterity): precision and evasion
/// - **Int** (Intelligence): cognitive power
///
/// Ordering follows declaration order, so iteration over [`StatKind::ALL`] and
/// over `BTreeMap<StatKind, _>` keys is stable.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StatKind {
    Hp,
    Mp,
    Spd,
    Str,
    Dex,
    Int,
}

impl StatKind {
    /// Every stat kind, in table order.
    pub const ALL: [StatKind; <StatKind as strum::EnumCount>::COUNT] = [
        StatKind::Hp,
        StatKind::Mp,
        StatKind::Spd,
        StatKind::Str,
        StatKind::Dex,
        StatKind::Int,
    ];

    /// Iterate over all stat kinds in table order.
    pub fn iter() -> impl Iterator<Item = StatKind> {
        Self::ALL.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted_and_exhaustive() {
        let mut sorted = StatKind::ALL;
        sorted.sort();
        assert_eq!(sorted, StatKind::ALL);
        assert_eq!(StatKind::iter().count(), 6);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("hp".parse::<StatKind>().unwrap(), StatKind::Hp);
        assert_eq!("Str".parse::<StatKind>().unwrap(), StatKind::Str);
        assert!("luck".parse::<StatKind>().is_err());
        assert_eq!(StatKind::Dex.to_string(), "DEX");
    }
}
