//! Point quantities and the two scoring scales used on tasks.
//!
//! Points are held as a count of half points so that vote totals and
//! settlement arithmetic stay exact.

use super::{ParsePointsError, TaskDomainError};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// A non-negative point quantity with half-point granularity.
///
/// # Examples
///
/// ```rust
/// use teamboard::task::domain::Points;
///
/// let points: Points = "7.5".parse().expect("valid points");
/// assert_eq!(points.halves(), 15);
/// assert_eq!(points.to_string(), "7.5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Points(u64);

impl Points {
    /// Zero points.
    pub const ZERO: Self = Self(0);

    /// Largest representable quantity.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a quantity from a number of half points.
    #[must_use]
    pub const fn from_halves(halves: u64) -> Self {
        Self(halves)
    }

    /// Creates a whole-point quantity.
    #[must_use]
    pub fn whole(points: u32) -> Self {
        Self(u64::from(points) * 2)
    }

    /// Creates a whole-point quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_whole(points: u64) -> Option<Self> {
        match points.checked_mul(2) {
            Some(halves) => Some(Self(halves)),
            None => None,
        }
    }

    /// Returns the quantity as a number of half points.
    #[must_use]
    pub const fn halves(self) -> u64 {
        self.0
    }

    /// Returns `true` when the quantity is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two quantities, saturating at [`Points::MAX`].
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 >> 1;
        if self.0 & 1 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl FromStr for Points {
    type Err = ParsePointsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePointsError(value.to_owned());
        let trimmed = value.trim();
        let (whole_part, fraction_part) = match trimmed.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (trimmed, ""),
        };

        if whole_part.is_empty() || !whole_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole_part.parse().map_err(|_| invalid())?;
        let mut fraction_digits = fraction_part.chars();
        let half = match fraction_digits.next() {
            None | Some('0') => 0,
            Some('5') => 1,
            Some(_) => return Err(invalid()),
        };
        if fraction_digits.any(|c| c != '0') {
            return Err(invalid());
        }

        whole
            .checked_mul(2)
            .and_then(|halves| halves.checked_add(half))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PointsVisitor)
    }
}

struct PointsVisitor;

impl Visitor<'_> for PointsVisitor {
    type Value = Points;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-negative multiple of 0.5 as a string or integer")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Points::checked_whole(value).ok_or_else(|| E::custom("point value overflows"))
    }
}

/// A member's point contribution to a task: 0 to 10 in half-point steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Points", into = "Points")]
pub struct VoteScore(Points);

impl VoteScore {
    /// Highest vote a member may cast.
    pub const MAX: Points = Points::from_halves(20);

    /// Creates a validated vote score.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidVoteScore`] when the value exceeds
    /// ten points.
    pub fn new(points: Points) -> Result<Self, TaskDomainError> {
        if points > Self::MAX {
            return Err(TaskDomainError::InvalidVoteScore(points));
        }
        Ok(Self(points))
    }

    /// Returns the vote as points.
    #[must_use]
    pub const fn points(self) -> Points {
        self.0
    }
}

impl TryFrom<Points> for VoteScore {
    type Error = TaskDomainError;

    fn try_from(value: Points) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoteScore> for Points {
    fn from(value: VoteScore) -> Self {
        value.0
    }
}

impl fmt::Display for VoteScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordinal peer approval of completed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReviewScore {
    /// Work not approved (0).
    Unapproved,
    /// Work approved with reservations (2).
    NotSatisfied,
    /// Work approved (3).
    Satisfied,
    /// Work approved without reservation (5).
    Excellent,
}

impl ReviewScore {
    /// Top of the review scale.
    pub const MAX_VALUE: u8 = 5;

    /// Returns the numeric value on the 0/2/3/5 scale.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Unapproved => 0,
            Self::NotSatisfied => 2,
            Self::Satisfied => 3,
            Self::Excellent => Self::MAX_VALUE,
        }
    }
}

impl TryFrom<u8> for ReviewScore {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unapproved),
            2 => Ok(Self::NotSatisfied),
            3 => Ok(Self::Satisfied),
            5 => Ok(Self::Excellent),
            other => Err(TaskDomainError::InvalidReviewScore(other)),
        }
    }
}

impl From<ReviewScore> for u8 {
    fn from(value: ReviewScore) -> Self {
        value.value()
    }
}

impl fmt::Display for ReviewScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
