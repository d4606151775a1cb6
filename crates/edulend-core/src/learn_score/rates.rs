//! Interest-rate advice derived from a LearnScore.
//!
//! Two advisors live here and are deliberately kept apart:
//!
//! - [`recommended_rate_band`] returns a min/max/recommended range and is
//!   what lenders see next to a loan request.
//! - [`suggested_rate`] returns a single value and pre-fills the borrower's
//!   loan-request form.
//!
//! They share cut points but not values (a 700 score is banded at 8%
//! recommended yet suggested at 7%). Product has not confirmed whether this
//! should be one table.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{BasisPoints, Percent};

/// Rate pre-filled on the loan form when the borrower has no score yet.
pub const DEFAULT_SUGGESTED_RATE: Percent = dec!(10.0);

const BASIS_POINTS_PER_PERCENT: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRateBand {
    pub min: Percent,
    pub max: Percent,
    pub recommended: Percent,
}

/// (lower bound, min, max, recommended), descending.
const RATE_BANDS: [(u32, Percent, Percent, Percent); 4] = [
    (800, dec!(5), dec!(7), dec!(6)),
    (700, dec!(7), dec!(10), dec!(8)),
    (600, dec!(10), dec!(13), dec!(11)),
    (500, dec!(13), dec!(17), dec!(15)),
];

const FLOOR_BAND: InterestRateBand = InterestRateBand {
    min: dec!(17),
    max: dec!(25),
    recommended: dec!(20),
};

/// Lender-facing APR range for a total LearnScore.
pub fn recommended_rate_band(total: u32) -> InterestRateBand {
    RATE_BANDS
        .iter()
        .find(|(cutoff, ..)| total >= *cutoff)
        .map(|&(_, min, max, recommended)| InterestRateBand {
            min,
            max,
            recommended,
        })
        .unwrap_or(FLOOR_BAND)
}

/// Single APR suggested to a borrower filling in a loan request.
pub fn suggested_rate(total: u32) -> Percent {
    if total >= 800 {
        dec!(5.0)
    } else if total >= 700 {
        dec!(7.0)
    } else if total >= 600 {
        dec!(10.0)
    } else if total >= 500 {
        dec!(13.0)
    } else {
        dec!(15.0)
    }
}

/// Value pre-filled in the loan-request rate field. A missing or zero score
/// means the borrower is unscored and gets the platform default.
pub fn prefill_rate(learn_score: Option<u32>) -> Percent {
    match learn_score {
        Some(total) if total > 0 => suggested_rate(total),
        _ => DEFAULT_SUGGESTED_RATE,
    }
}

/// Convert a percentage to contract basis points (7.25% -> 725), rounding
/// half away from zero. Saturates at the `BasisPoints` range.
pub fn percent_to_basis_points(percent: Percent) -> BasisPoints {
    let saturated = if percent.is_sign_negative() {
        BasisPoints::MIN
    } else {
        BasisPoints::MAX
    };
    percent
        .checked_mul(BASIS_POINTS_PER_PERCENT)
        .map(|bps| bps.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|bps| bps.to_i64())
        .unwrap_or(saturated)
}

pub fn basis_points_to_percent(bps: BasisPoints) -> Percent {
    Decimal::from(bps) / BASIS_POINTS_PER_PERCENT
}
