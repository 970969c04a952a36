//! Dice rolling for stat generation.

use crate::env::RandomSource;

/// A "roll N dice with S sides, keep the best N - D" recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
    pub drop_lowest: u32,
}

impl DiceSpec {
    /// Classic 4d6, drop the lowest.
    pub const FOUR_D6_DROP_LOWEST: Self = Self {
        count: 4,
        sides: 6,
        drop_lowest: 1,
    };

    pub const fn new(count: u32, sides: u32, drop_lowest: u32) -> Self {
        Self {
            count,
            sides,
            drop_lowest,
        }
    }

    pub fn roll(&self, rng: &mut impl RandomSource) -> i32 {
        roll_dice_drop_lowest(rng, self.count, self.sides, self.drop_lowest)
    }

    /// Smallest possible result.
    pub fn min_total(&self) -> i32 {
        self.kept() as i32
    }

    /// Largest possible result.
    pub fn max_total(&self) -> i32 {
        let total = i64::from(self.kept()) * i64::from(clamp_sides(self.sides));
        saturate(total)
    }

    fn kept(&self) -> u32 {
        self.count.saturating_sub(self.drop_lowest)
    }
}

impl Default for DiceSpec {
    fn default() -> Self {
        Self::FOUR_D6_DROP_LOWEST
    }
}

/// Roll `count` dice of `sides` faces and sum all but the `drop` lowest.
///
/// Draws exactly `count` values from `rng`, each in `[1, sides]`. Dropping as
/// many dice as are rolled (or more) yields 0. A die with fewer than one side
/// is treated as a d1, and sides beyond `i32::MAX` are capped there. The total
/// saturates at `i32::MAX`.
pub fn roll_dice_drop_lowest(
    rng: &mut impl RandomSource,
    count: u32,
    sides: u32,
    drop: u32,
) -> i32 {
    let sides = clamp_sides(sides);
    let mut rolls: Vec<i32> = (0..count).map(|_| rng.next_int(1, sides)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));

    let kept = count.saturating_sub(drop) as usize;
    saturate(rolls.iter().take(kept).map(|&roll| i64::from(roll)).sum())
}

fn clamp_sides(sides: u32) -> i32 {
    i32::try_from(sides).unwrap_or(i32::MAX).max(1)
}

fn saturate(total: i64) -> i32 {
    i32::try_from(total).unwrap_or(i32::MAX)
}
