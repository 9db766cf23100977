//! Review settlement: turning a task's vote total and peer reviews into its
//! achieved score.
//!
//! Every member except the assignee must review before a task settles. The
//! achieved score is then the vote total scaled by the share of the maximum
//! review score received, rounded half up to whole points. The calculation
//! always starts from the current total and review set, so repeating it after
//! any change yields the correct value.

use super::{Points, ReviewScore};

/// Result of evaluating a task's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The team has fewer than two members, so review can never complete.
    Unreachable,
    /// Reviews are still outstanding; any stored achieved score is kept.
    Pending {
        /// Reviews received so far.
        received: u64,
        /// Reviews needed to settle.
        required: u64,
    },
    /// Review is complete and the task settles at this score.
    Settled(Points),
}

/// Evaluates settlement for a task.
///
/// `member_count` is the size of the whole team, assignee included.
///
/// # Examples
///
/// ```rust
/// use teamboard::task::domain::{settle_achievement, Points, ReviewScore, Settlement};
///
/// let reviews = [ReviewScore::Excellent, ReviewScore::Excellent, ReviewScore::Satisfied];
/// let settlement = settle_achievement(Points::whole(100), 4, &reviews);
/// assert_eq!(settlement, Settlement::Settled(Points::whole(87)));
/// ```
#[must_use]
pub fn settle_achievement(total: Points, member_count: u64, reviews: &[ReviewScore]) -> Settlement {
    let required = member_count.saturating_sub(1);
    if required == 0 {
        return Settlement::Unreachable;
    }

    let received = u64::try_from(reviews.len()).unwrap_or(u64::MAX);
    if received < required {
        return Settlement::Pending { received, required };
    }

    let score_sum: u128 = reviews
        .iter()
        .map(|review| u128::from(review.value()))
        .sum();
    let max_possible = u128::from(required) * u128::from(ReviewScore::MAX_VALUE);
    Settlement::Settled(scale_rounded(total, score_sum, max_possible))
}

/// Computes `round_half_up(total × numerator ÷ denominator)` in whole points.
///
/// `total` is counted in halves, so the exact quotient is
/// `halves × numerator ÷ (2 × denominator)`; adding half the divisor before
/// flooring rounds it half up.
fn scale_rounded(total: Points, numerator: u128, denominator: u128) -> Points {
    let dividend = u128::from(total.halves())
        .saturating_mul(numerator)
        .saturating_add(denominator);
    let divisor = denominator.saturating_mul(2);
    let whole = dividend.div_euclid(divisor);
    u64::try_from(whole)
        .ok()
        .and_then(Points::checked_whole)
        .unwrap_or(Points::MAX)
}
