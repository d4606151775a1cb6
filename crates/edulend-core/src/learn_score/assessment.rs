use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::activity::{
    out_of_domain_records, platform_age_days, repayment_activity, scholarship_activity,
    LoanRecord, ScholarshipRecord,
};
use super::aggregate::{
    build_learn_score, component_breakdown, ComponentBreakdown, LearnScore, ScoreHistoryEntry,
};
use super::components::{
    compute_components, out_of_domain_inputs, AcademicActivity, CommunityActivity,
    LearnScoreInput, RepaymentActivity, ScholarshipActivity,
};
use super::rates::{recommended_rate_band, suggested_rate, InterestRateBand};
use super::risk::{classify_risk, RiskAssessment};
use crate::types::*;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Everything needed to assess one identity.
///
/// Repayment and scholarship counters may be given directly or derived from
/// `loans` / `scholarships` records. Explicit counters take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    pub academic: AcademicActivity,
    pub community: CommunityActivity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment: Option<RepaymentActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship: Option<ScholarshipActivity>,
    pub loans: Vec<LoanRecord>,
    pub scholarships: Vec<ScholarshipRecord>,
    /// When set, platform age is measured from this instant to `as_of`.
    #[serde(alias = "identityCreatedAt", skip_serializing_if = "Option::is_none")]
    pub identity_created_at: Option<DateTime<Utc>>,
    /// Evaluation instant; defaults to now.
    #[serde(alias = "asOf", skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
    pub history: Vec<ScoreHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnScoreAssessment {
    pub learn_score: LearnScore,
    pub breakdown: Vec<ComponentBreakdown>,
    pub risk: RiskAssessment,
    pub rate_band: InterestRateBand,
    pub suggested_rate: Percent,
    /// The counters the score was computed from, after record derivation.
    pub counters: LearnScoreInput,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full LearnScore pipeline: counters, sub-scores, total, grade,
/// risk tier and rate advice.
///
/// Never fails. Out-of-domain counters are clamped and reported in
/// `warnings`.
pub fn assess_learn_score(input: &AssessmentInput) -> ComputationOutput<LearnScoreAssessment> {
    let start = Instant::now();
    let as_of = input.as_of.unwrap_or_else(Utc::now);

    let (counters, mut warnings) = resolve_counters(input, as_of);
    warnings.extend(out_of_domain_inputs(&counters));
    for note in &warnings {
        warn!(%note, "learn score input adjusted");
    }

    let components = compute_components(&counters);
    let learn_score = build_learn_score(components, input.history.clone(), as_of);
    let total = learn_score.total;

    debug!(total, grade = %learn_score.grade, "learn score assessed");

    let output = LearnScoreAssessment {
        breakdown: component_breakdown(&learn_score.components),
        risk: classify_risk(total),
        rate_band: recommended_rate_band(total),
        suggested_rate: suggested_rate(total),
        learn_score,
        counters,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "academic": "gpa/4.0*200 + min(100, courses*2) + min(100, certificates*20), cap 400",
        "loan_repayment": "on_time*5 + completed*50 - defaulted*100 - late*10, clamp 0..350",
        "scholarships": "min(75, count*15) + min(75, amount/1000*10), cap 150",
        "community": "min(40, votes*5) + min(40, helped*10) + min(20, days/30), cap 100",
        "total": "sum of components, clamp 0..1000",
        "rounding": "sub-scores floored to whole points",
    });

    with_metadata(
        "LearnScore composite reputation scoring",
        &assumptions,
        warnings,
        elapsed,
        output,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn resolve_counters(input: &AssessmentInput, as_of: DateTime<Utc>) -> (LearnScoreInput, Vec<String>) {
    let mut warnings = Vec::new();

    let repayment = match &input.repayment {
        Some(explicit) => {
            if !input.loans.is_empty() {
                warnings.push(format!(
                    "repayment counters given explicitly; {} loan record(s) ignored",
                    input.loans.len()
                ));
            }
            explicit.clone()
        }
        None => {
            warnings.extend(out_of_domain_records(&input.loans, &[]));
            repayment_activity(&input.loans)
        }
    };

    let scholarship = match &input.scholarship {
        Some(explicit) => {
            if !input.scholarships.is_empty() {
                warnings.push(format!(
                    "scholarship counters given explicitly; {} scholarship record(s) ignored",
                    input.scholarships.len()
                ));
            }
            explicit.clone()
        }
        None => {
            warnings.extend(out_of_domain_records(&[], &input.scholarships));
            scholarship_activity(&input.scholarships)
        }
    };

    let mut community = input.community.clone();
    if let Some(created_at) = input.identity_created_at {
        let derived = platform_age_days(created_at, as_of);
        if community.platform_age_days != 0 && community.platform_age_days != derived {
            warnings.push(format!(
                "community.platform_age_days {} replaced by {} derived from identity_created_at",
                community.platform_age_days, derived
            ));
        }
        if created_at > as_of {
            warnings.push("identity_created_at is after as_of; platform age set to 0".to_string());
        }
        community.platform_age_days = derived;
    }

    let counters = LearnScoreInput {
        academic: input.academic.clone(),
        repayment,
        scholarship,
        community,
    };

    (counters, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learn_score::activity::LoanStatus;
    use crate::learn_score::grade::Grade;
    use crate::learn_score::risk::RiskLevel;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn strong_student() -> AssessmentInput {
        AssessmentInput {
            academic: AcademicActivity {
                gpa: dec!(4.0),
                courses_completed: 50,
                certificates_count: 5,
            },
            community: CommunityActivity {
                dao_votes: 8,
                helped_students: 4,
                platform_age_days: 600,
            },
            repayment: Some(RepaymentActivity {
                on_time_payments: 30,
                late_payments: 0,
                completed_loans: 4,
                defaulted_loans: 0,
            }),
            scholarship: Some(ScholarshipActivity {
                scholarships_received: 5,
                total_scholarship_amount: dec!(10_000),
            }),
            as_of: Some(as_of()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_pipeline_saturated() {
        let out = assess_learn_score(&strong_student());
        let a = &out.result;
        assert_eq!(a.learn_score.total, 1000);
        assert_eq!(a.learn_score.grade, Grade::APlus);
        assert_eq!(a.risk.level, RiskLevel::VeryLow);
        assert_eq!(a.rate_band.recommended, dec!(6));
        assert_eq!(a.suggested_rate, dec!(5.0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_derived_from_records() {
        let input = AssessmentInput {
            academic: AcademicActivity {
                gpa: dec!(3.0),
                courses_completed: 10,
                certificates_count: 1,
            },
            loans: vec![LoanRecord {
                loan_nft_id: "1".into(),
                amount: dec!(5000),
                status: LoanStatus::Active,
                started_at: as_of() - Duration::days(120),
                completed_at: None,
                on_time_payments: 4,
                late_payments: 0,
                defaulted: false,
            }],
            identity_created_at: Some(as_of() - Duration::days(90)),
            as_of: Some(as_of()),
            ..Default::default()
        };
        let out = assess_learn_score(&input);
        let a = &out.result;
        assert_eq!(a.counters.repayment.on_time_payments, 4);
        assert_eq!(a.counters.community.platform_age_days, 90);
        // 150 + 20 + 20 academic; 20 repayment; 0 scholarship; 3 community
        assert_eq!(a.learn_score.components.academic_achievements, 190);
        assert_eq!(a.learn_score.components.loan_repayment, 20);
        assert_eq!(a.learn_score.components.community_contribution, 3);
        assert_eq!(a.learn_score.total, 213);
        assert_eq!(a.learn_score.grade, Grade::F);
        assert_eq!(a.suggested_rate, dec!(15.0));
    }

    #[test]
    fn test_clamped_inputs_warn_but_succeed() {
        let mut input = strong_student();
        input.academic.gpa = dec!(4.7);
        input.repayment = Some(RepaymentActivity {
            on_time_payments: -3,
            ..Default::default()
        });
        let out = assess_learn_score(&input);
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.result.learn_score.components.academic_achievements, 400);
        assert_eq!(out.result.learn_score.components.loan_repayment, 0);
    }

    fn loan_record(on_time: i64, late: i64) -> LoanRecord {
        LoanRecord {
            loan_nft_id: "3".into(),
            amount: dec!(2500),
            status: LoanStatus::Repaying,
            started_at: as_of() - Duration::days(60),
            completed_at: None,
            on_time_payments: on_time,
            late_payments: late,
            defaulted: false,
        }
    }

    fn scholarship_record(amount: Money) -> ScholarshipRecord {
        ScholarshipRecord {
            pool_id: "1".into(),
            pool_name: "STEM".into(),
            amount,
            received_at: as_of(),
            reason: String::new(),
            transaction_hash: String::new(),
        }
    }

    #[test]
    fn test_negative_record_counts_warn() {
        let input = AssessmentInput {
            loans: vec![loan_record(6, -50)],
            as_of: Some(as_of()),
            ..Default::default()
        };
        let out = assess_learn_score(&input);
        assert_eq!(out.result.counters.repayment.late_payments, 0);
        assert_eq!(out.result.learn_score.components.loan_repayment, 30);
        assert_eq!(
            out.warnings,
            vec!["loans[0].late_payments -50 is negative and was treated as 0".to_string()]
        );
    }

    #[test]
    fn test_huge_scholarship_records_do_not_panic() {
        let input = AssessmentInput {
            scholarships: vec![
                scholarship_record(Decimal::MAX),
                scholarship_record(Decimal::MAX),
            ],
            as_of: Some(as_of()),
            ..Default::default()
        };
        let out = assess_learn_score(&input);
        assert_eq!(
            out.result.counters.scholarship.total_scholarship_amount,
            Decimal::MAX
        );
        assert_eq!(out.result.learn_score.components.scholarships_earned, 105);
    }

    #[test]
    fn test_identity_age_replaces_supplied_age() {
        let mut input = strong_student();
        input.community.platform_age_days = 600;
        input.identity_created_at = Some(as_of() - Duration::days(90));
        let out = assess_learn_score(&input);
        assert_eq!(out.result.counters.community.platform_age_days, 90);
        assert_eq!(
            out.warnings,
            vec![
                "community.platform_age_days 600 replaced by 90 derived from identity_created_at"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_identity_age_matching_supplied_age_is_silent() {
        let mut input = strong_student();
        input.community.platform_age_days = 90;
        input.identity_created_at = Some(as_of() - Duration::days(90));
        assert!(assess_learn_score(&input).warnings.is_empty());
    }

    #[test]
    fn test_identity_created_in_future() {
        let mut input = strong_student();
        input.community.platform_age_days = 0;
        input.identity_created_at = Some(as_of() + Duration::days(2));
        let out = assess_learn_score(&input);
        assert_eq!(out.result.counters.community.platform_age_days, 0);
        assert_eq!(
            out.warnings,
            vec!["identity_created_at is after as_of; platform age set to 0".to_string()]
        );
    }

    #[test]
    fn test_explicit_counters_win_over_records() {
        let mut input = strong_student();
        input.scholarships = vec![ScholarshipRecord {
            pool_id: "1".into(),
            pool_name: "STEM".into(),
            amount: dec!(10),
            received_at: as_of(),
            reason: String::new(),
            transaction_hash: String::new(),
        }];
        let out = assess_learn_score(&input);
        assert_eq!(out.result.counters.scholarship.scholarships_received, 5);
        assert!(out.warnings[0].contains("scholarship record(s) ignored"));
    }

    #[test]
    fn test_deterministic() {
        let input = strong_student();
        let a = assess_learn_score(&input).result;
        let b = assess_learn_score(&input).result;
        assert_eq!(a.learn_score, b.learn_score);
        assert_eq!(a.risk, b.risk);
    }

    #[test]
    fn test_metadata_populated() {
        let out = assess_learn_score(&strong_student());
        assert!(out.methodology.contains("LearnScore"));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_history_carried_through() {
        let mut input = strong_student();
        input.history = vec![
            ScoreHistoryEntry {
                date: as_of(),
                score: 785,
                reason: "Completed CS301 with A grade".into(),
            },
            ScoreHistoryEntry {
                date: as_of() - Duration::days(7),
                score: 760,
                reason: "On-time loan payment".into(),
            },
        ];
        let out = assess_learn_score(&input);
        assert_eq!(out.result.learn_score.history, input.history);
        assert_eq!(out.result.learn_score.last_updated, as_of());
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let input = AssessmentInput {
            as_of: Some(as_of()),
            ..Default::default()
        };
        let out = assess_learn_score(&input);
        assert_eq!(out.result.learn_score.total, 0);
        assert_eq!(
            out.result.counters.scholarship.total_scholarship_amount,
            Decimal::ZERO
        );
        assert_eq!(out.result.risk.level, RiskLevel::VeryHigh);
    }
}
