//! Achievement colour ramp.
//!
//! Maps the share of a task's points that were achieved onto a red, orange,
//! yellow, green, teal gradient. Arithmetic is exact: the ratio is kept as a
//! fraction and each channel is rounded half up.

use super::Points;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Colour at ratio 0.
pub const RAMP_RED: Rgb = Rgb::new(220, 40, 40);
/// Colour at ratio 0.25.
pub const RAMP_ORANGE: Rgb = Rgb::new(255, 140, 0);
/// Colour at ratio 0.5.
pub const RAMP_YELLOW: Rgb = Rgb::new(255, 200, 0);
/// Colour at ratio 0.75.
pub const RAMP_LIGHT_GREEN: Rgb = Rgb::new(130, 220, 0);
/// Colour at ratio 1.
pub const RAMP_TEAL: Rgb = Rgb::new(0, 160, 120);

/// Number of equal-width segments between the ramp's control points.
const SEGMENTS: u64 = 4;

/// A ratio clamped to `[0, 1]`, held as an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRatio {
    numerator: u64,
    denominator: u64,
}

impl AchievementRatio {
    /// Creates a ratio from a signed fraction, clamping it to `[0, 1]`.
    ///
    /// Returns `None` when the denominator is not positive.
    #[must_use]
    pub fn from_fraction(numerator: i64, denominator: i64) -> Option<Self> {
        let positive_denominator = u64::try_from(denominator).ok().filter(|value| *value > 0)?;
        let clamped = u64::try_from(numerator)
            .unwrap_or(0)
            .min(positive_denominator);
        Some(Self {
            numerator: clamped,
            denominator: positive_denominator,
        })
    }

    /// Creates the ratio `achieved / total`, clamped to `[0, 1]`.
    ///
    /// Returns `None` when `total` is zero.
    #[must_use]
    pub fn of_points(achieved: Points, total: Points) -> Option<Self> {
        if total.is_zero() {
            return None;
        }
        Some(Self {
            numerator: achieved.halves().min(total.halves()),
            denominator: total.halves(),
        })
    }

    /// Returns the clamped numerator.
    #[must_use]
    pub const fn numerator(self) -> u64 {
        self.numerator
    }

    /// Returns the denominator.
    #[must_use]
    pub const fn denominator(self) -> u64 {
        self.denominator
    }
}

/// Returns the ramp colour for `ratio`.
///
/// # Examples
///
/// ```rust
/// use teamboard::task::domain::{ramp_color, AchievementRatio, Rgb};
///
/// let half = AchievementRatio::from_fraction(1, 2).expect("positive denominator");
/// assert_eq!(ramp_color(half), Rgb::new(255, 200, 0));
/// ```
#[must_use]
pub fn ramp_color(ratio: AchievementRatio) -> Rgb {
    let denominator = u128::from(ratio.denominator);
    let scaled = u128::from(ratio.numerator) * u128::from(SEGMENTS);
    let segment = scaled
        .div_euclid(denominator)
        .min(u128::from(SEGMENTS - 1));
    let offset = scaled - segment * denominator;
    let (start, end) = segment_bounds(segment);

    Rgb::new(
        interpolate(start.red, end.red, offset, denominator),
        interpolate(start.green, end.green, offset, denominator),
        interpolate(start.blue, end.blue, offset, denominator),
    )
}

/// Returns the colour for a task's achieved and total scores.
///
/// Returns `None` when the total is zero.
#[must_use]
pub fn achievement_color(achieved: Points, total: Points) -> Option<Rgb> {
    AchievementRatio::of_points(achieved, total).map(ramp_color)
}

const fn segment_bounds(segment: u128) -> (Rgb, Rgb) {
    match segment {
        0 => (RAMP_RED, RAMP_ORANGE),
        1 => (RAMP_ORANGE, RAMP_YELLOW),
        2 => (RAMP_YELLOW, RAMP_LIGHT_GREEN),
        _ => (RAMP_LIGHT_GREEN, RAMP_TEAL),
    }
}

/// Interpolates one channel at `offset / denominator` of the way from
/// `start` to `end`, rounding half up.
fn interpolate(start: u8, end: u8, offset: u128, denominator: u128) -> u8 {
    let span = i128::from(end) - i128::from(start);
    let signed_offset = i128::try_from(offset).unwrap_or(i128::MAX);
    let signed_denominator = i128::try_from(denominator).unwrap_or(i128::MAX);
    let scaled = i128::from(start) * signed_denominator + span * signed_offset;
    let rounded = (2 * scaled + signed_denominator).div_euclid(2 * signed_denominator);
    u8::try_from(rounded).unwrap_or(if span < 0 { start } else { end })
}
