//! Per-stat value record: base, modifier and optional modifier limits.

/// Optional bounds on a stat's modifier.
///
/// Both bounds are expressed relative to the stat, not as absolute effective
/// values. See [`StatTable::set_modifier`](super::StatTable::set_modifier) for
/// how each bound is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatLimits {
    pub lower: Option<f32>,
    pub upper: Option<f32>,
}

impl StatLimits {
    /// No bounds in either direction.
    pub const UNBOUNDED: Self = Self {
        lower: None,
        upper: None,
    };

    pub const fn new(lower: Option<f32>, upper: Option<f32>) -> Self {
        Self { lower, upper }
    }

    pub const fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

/// One entry of a [`StatTable`](super::StatTable).
///
/// `effective = base + modifier`. The base is the persisted magnitude; the
/// modifier is a signed delta layered on top of it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRecord {
    pub base: f32,
    pub modifier: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub limits: StatLimits,
}

impl StatRecord {
    /// Record with the given base and no modifier or limits.
    pub const fn with_base(base: f32) -> Self {
        Self {
            base,
            modifier: 0.0,
            limits: StatLimits::UNBOUNDED,
        }
    }

    pub const fn new(base: f32, modifier: f32, limits: StatLimits) -> Self {
        Self {
            base,
            modifier,
            limits,
        }
    }

    /// Base plus modifier.
    pub fn effective(&self) -> f32 {
        self.base + self.modifier
    }

    /// Effective value rounded to the nearest integer.
    pub fn as_rounded(&self) -> i32 {
        self.effective().round() as i32
    }

    /// Compact `base±mod=effective` rendering, e.g. `10+2=12` or `10-3=7`.
    pub fn format(&self) -> String {
        let sign = if self.modifier < 0.0 { '-' } else { '+' };
        format!(
            "{}{}{}={}",
            self.base,
            sign,
            self.modifier.abs(),
            self.effective()
        )
    }
}
