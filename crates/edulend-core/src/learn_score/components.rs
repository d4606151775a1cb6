//! Sub-score calculators for the four LearnScore components.
//!
//! Each calculator turns a bundle of raw activity counters into a capped,
//! whole-point sub-score:
//!
//! | Component              | Cap |
//! |------------------------|-----|
//! | Academic achievements  | 400 |
//! | Loan repayment         | 350 |
//! | Scholarships earned    | 150 |
//! | Community contribution | 100 |
//!
//! Out-of-domain counters (negative counts, GPA outside 0.0-4.0) are clamped,
//! never rejected. Intermediate terms are carried in `Decimal` and the final
//! value is floored after the cap is applied.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Count, Money};

// ---------------------------------------------------------------------------
// Caps
// ---------------------------------------------------------------------------

pub const ACADEMIC_MAX: u32 = 400;
pub const LOAN_REPAYMENT_MAX: u32 = 350;
pub const SCHOLARSHIP_MAX: u32 = 150;
pub const COMMUNITY_MAX: u32 = 100;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const MAX_GPA: Decimal = dec!(4.0);
const GPA_POINTS: Decimal = dec!(200);
const POINTS_PER_COURSE: Decimal = dec!(2);
const COURSES_CAP: Decimal = dec!(100);
const POINTS_PER_CERTIFICATE: Decimal = dec!(20);
const CERTIFICATES_CAP: Decimal = dec!(100);

const POINTS_PER_ON_TIME_PAYMENT: Decimal = dec!(5);
const POINTS_PER_COMPLETED_LOAN: Decimal = dec!(50);
const PENALTY_PER_DEFAULT: Decimal = dec!(100);
const PENALTY_PER_LATE_PAYMENT: Decimal = dec!(10);

const POINTS_PER_SCHOLARSHIP: Decimal = dec!(15);
const SCHOLARSHIP_COUNT_CAP: Decimal = dec!(75);
const SCHOLARSHIP_AMOUNT_UNIT: Decimal = dec!(1000);
const POINTS_PER_AMOUNT_UNIT: Decimal = dec!(10);
const SCHOLARSHIP_AMOUNT_CAP: Decimal = dec!(75);

const POINTS_PER_DAO_VOTE: Decimal = dec!(5);
const DAO_VOTES_CAP: Decimal = dec!(40);
const POINTS_PER_HELPED_STUDENT: Decimal = dec!(10);
const HELPED_STUDENTS_CAP: Decimal = dec!(40);
const DAYS_PER_AGE_POINT: Decimal = dec!(30);
const PLATFORM_AGE_CAP: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcademicActivity {
    /// Grade point average on a 4.0 scale.
    pub gpa: Decimal,
    #[serde(alias = "coursesCompleted")]
    pub courses_completed: Count,
    #[serde(alias = "certificatesCount")]
    pub certificates_count: Count,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepaymentActivity {
    #[serde(alias = "onTimePayments")]
    pub on_time_payments: Count,
    #[serde(alias = "latePayments")]
    pub late_payments: Count,
    #[serde(alias = "completedLoans")]
    pub completed_loans: Count,
    #[serde(alias = "defaultedLoans")]
    pub defaulted_loans: Count,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarshipActivity {
    #[serde(alias = "scholarshipsReceived")]
    pub scholarships_received: Count,
    #[serde(alias = "totalScholarshipAmount")]
    pub total_scholarship_amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityActivity {
    #[serde(alias = "daoVotes")]
    pub dao_votes: Count,
    #[serde(alias = "helpedStudents")]
    pub helped_students: Count,
    /// Days since the identity was created.
    #[serde(alias = "platformAgeDays", alias = "platformAge")]
    pub platform_age_days: Count,
}

/// All raw counters needed to produce a LearnScore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnScoreInput {
    pub academic: AcademicActivity,
    pub repayment: RepaymentActivity,
    pub scholarship: ScholarshipActivity,
    pub community: CommunityActivity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnScoreComponents {
    #[serde(alias = "academicAchievements")]
    pub academic_achievements: u32,
    #[serde(alias = "loanRepayment")]
    pub loan_repayment: u32,
    #[serde(alias = "scholarshipsEarned")]
    pub scholarships_earned: u32,
    #[serde(alias = "communityContribution")]
    pub community_contribution: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Academic achievements sub-score (0-400).
///
/// `gpa/4.0 * 200 + min(100, courses*2) + min(100, certificates*20)`.
/// GPA is clamped to 0.0-4.0 first, so the GPA term never exceeds 200.
pub fn academic_score(gpa: Decimal, courses_completed: Count, certificates_count: Count) -> u32 {
    let gpa_score = clamp_gpa(gpa) / MAX_GPA * GPA_POINTS;
    let courses_score = (non_negative(courses_completed) * POINTS_PER_COURSE).min(COURSES_CAP);
    let cert_score =
        (non_negative(certificates_count) * POINTS_PER_CERTIFICATE).min(CERTIFICATES_CAP);

    finalize(gpa_score + courses_score + cert_score, ACADEMIC_MAX)
}

/// Loan repayment sub-score (0-350).
///
/// Rewards `on_time*5 + completed*50`, penalises `defaulted*100 + late*10`.
/// The net value floors at zero however heavy the penalties are.
pub fn loan_repayment_score(
    on_time_payments: Count,
    late_payments: Count,
    completed_loans: Count,
    defaulted_loans: Count,
) -> u32 {
    let reward = non_negative(on_time_payments) * POINTS_PER_ON_TIME_PAYMENT
        + non_negative(completed_loans) * POINTS_PER_COMPLETED_LOAN;
    let penalty = non_negative(defaulted_loans) * PENALTY_PER_DEFAULT
        + non_negative(late_payments) * PENALTY_PER_LATE_PAYMENT;

    finalize(reward - penalty, LOAN_REPAYMENT_MAX)
}

/// Scholarship sub-score (0-150).
///
/// Five scholarships saturate the count term; 7,500 currency units saturate
/// the amount term.
pub fn scholarship_score(scholarships_received: Count, total_scholarship_amount: Money) -> u32 {
    let count_score =
        (non_negative(scholarships_received) * POINTS_PER_SCHOLARSHIP).min(SCHOLARSHIP_COUNT_CAP);
    let amount_score = (total_scholarship_amount.max(Decimal::ZERO) / SCHOLARSHIP_AMOUNT_UNIT
        * POINTS_PER_AMOUNT_UNIT)
        .min(SCHOLARSHIP_AMOUNT_CAP);

    finalize(count_score + amount_score, SCHOLARSHIP_MAX)
}

/// Community contribution sub-score (0-100).
///
/// One age point accrues per 30 days on the platform, fractional until the
/// final floor.
pub fn community_score(dao_votes: Count, helped_students: Count, platform_age_days: Count) -> u32 {
    let vote_score = (non_negative(dao_votes) * POINTS_PER_DAO_VOTE).min(DAO_VOTES_CAP);
    let help_score =
        (non_negative(helped_students) * POINTS_PER_HELPED_STUDENT).min(HELPED_STUDENTS_CAP);
    let age_score = (non_negative(platform_age_days) / DAYS_PER_AGE_POINT).min(PLATFORM_AGE_CAP);

    finalize(vote_score + help_score + age_score, COMMUNITY_MAX)
}

impl AcademicActivity {
    pub fn score(&self) -> u32 {
        academic_score(self.gpa, self.courses_completed, self.certificates_count)
    }
}

impl RepaymentActivity {
    pub fn score(&self) -> u32 {
        loan_repayment_score(
            self.on_time_payments,
            self.late_payments,
            self.completed_loans,
            self.defaulted_loans,
        )
    }
}

impl ScholarshipActivity {
    pub fn score(&self) -> u32 {
        scholarship_score(self.scholarships_received, self.total_scholarship_amount)
    }
}

impl CommunityActivity {
    pub fn score(&self) -> u32 {
        community_score(self.dao_votes, self.helped_students, self.platform_age_days)
    }
}

/// Run all four calculators over one set of counters.
pub fn compute_components(input: &LearnScoreInput) -> LearnScoreComponents {
    LearnScoreComponents {
        academic_achievements: input.academic.score(),
        loan_repayment: input.repayment.score(),
        scholarships_earned: input.scholarship.score(),
        community_contribution: input.community.score(),
    }
}

/// Describe every counter that falls outside its documented domain and
/// will be clamped by the calculators.
pub fn out_of_domain_inputs(input: &LearnScoreInput) -> Vec<String> {
    let mut notes = Vec::new();

    if input.academic.gpa < Decimal::ZERO || input.academic.gpa > MAX_GPA {
        notes.push(format!(
            "academic.gpa {} is outside 0.0-4.0 and was clamped",
            input.academic.gpa
        ));
    }
    if input.scholarship.total_scholarship_amount < Decimal::ZERO {
        notes.push(format!(
            "scholarship.total_scholarship_amount {} is negative and was treated as 0",
            input.scholarship.total_scholarship_amount
        ));
    }

    let counts = [
        ("academic.courses_completed", input.academic.courses_completed),
        ("academic.certificates_count", input.academic.certificates_count),
        ("repayment.on_time_payments", input.repayment.on_time_payments),
        ("repayment.late_payments", input.repayment.late_payments),
        ("repayment.completed_loans", input.repayment.completed_loans),
        ("repayment.defaulted_loans", input.repayment.defaulted_loans),
        (
            "scholarship.scholarships_received",
            input.scholarship.scholarships_received,
        ),
        ("community.dao_votes", input.community.dao_votes),
        ("community.helped_students", input.community.helped_students),
        ("community.platform_age_days", input.community.platform_age_days),
    ];
    for (field, value) in counts {
        if value < 0 {
            notes.push(format!("{field} {value} is negative and was treated as 0"));
        }
    }

    notes
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn non_negative(count: Count) -> Decimal {
    Decimal::from(count.max(0))
}

fn clamp_gpa(gpa: Decimal) -> Decimal {
    gpa.max(Decimal::ZERO).min(MAX_GPA)
}

/// Clamp to `[0, cap]` and drop any fractional point.
fn finalize(raw: Decimal, cap: u32) -> u32 {
    raw.max(Decimal::ZERO)
        .min(Decimal::from(cap))
        .floor()
        .to_u32()
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
