use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::components::{
    LearnScoreComponents, ACADEMIC_MAX, COMMUNITY_MAX, LOAN_REPAYMENT_MAX, SCHOLARSHIP_MAX,
};
use super::grade::{classify_grade, Grade};

pub const LEARN_SCORE_MAX: u32 = 1000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One entry in the externally owned score audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub date: DateTime<Utc>,
    pub score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnScore {
    pub total: u32,
    pub components: LearnScoreComponents,
    pub grade: Grade,
    pub last_updated: DateTime<Utc>,
    pub history: Vec<ScoreHistoryEntry>,
}

/// Per-component row for score displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub name: String,
    pub value: u32,
    pub max: u32,
    /// Share of the component cap earned, 0-100, two decimal places.
    pub percent_of_max: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sum the four components into a total in 0-1000.
///
/// The caps already add up to exactly 1000; the upper clamp only matters if
/// a cap is ever raised.
pub fn calculate_learn_score(components: &LearnScoreComponents) -> u32 {
    let sum = u64::from(components.academic_achievements)
        + u64::from(components.loan_repayment)
        + u64::from(components.scholarships_earned)
        + u64::from(components.community_contribution);

    sum.min(u64::from(LEARN_SCORE_MAX)) as u32
}

/// Assemble a `LearnScore` snapshot. The history is carried through in the
/// order given.
pub fn build_learn_score(
    components: LearnScoreComponents,
    history: Vec<ScoreHistoryEntry>,
    as_of: DateTime<Utc>,
) -> LearnScore {
    let total = calculate_learn_score(&components);

    LearnScore {
        total,
        components,
        grade: classify_grade(total),
        last_updated: as_of,
        history,
    }
}

pub fn component_breakdown(components: &LearnScoreComponents) -> Vec<ComponentBreakdown> {
    [
        (
            "Academic Achievements",
            components.academic_achievements,
            ACADEMIC_MAX,
        ),
        ("Loan Repayment", components.loan_repayment, LOAN_REPAYMENT_MAX),
        (
            "Scholarships Earned",
            components.scholarships_earned,
            SCHOLARSHIP_MAX,
        ),
        (
            "Community Contribution",
            components.community_contribution,
            COMMUNITY_MAX,
        ),
    ]
    .into_iter()
    .map(|(name, value, max)| ComponentBreakdown {
        name: name.to_string(),
        value,
        max,
        percent_of_max: percent_of(value, max),
    })
    .collect()
}

fn percent_of(value: u32, max: u32) -> Decimal {
    if max == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(value) / Decimal::from(max) * dec!(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
