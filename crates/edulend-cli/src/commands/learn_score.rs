use chrono::{DateTime, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use edulend_core::learn_score::assessment::{self, AssessmentInput};
use edulend_core::learn_score::components::{
    AcademicActivity, CommunityActivity, RepaymentActivity, ScholarshipActivity,
};
use edulend_core::learn_score::grade::classify_grade;
use edulend_core::learn_score::rates::{
    percent_to_basis_points, prefill_rate, recommended_rate_band, suggested_rate,
};
use edulend_core::learn_score::risk::classify_risk;

use crate::input;

/// Arguments for a full LearnScore assessment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LearnScoreArgs {
    /// Path to a JSON or YAML assessment file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// GPA on a 4.0 scale
    #[arg(long, default_value = "0")]
    pub gpa: Decimal,

    /// Courses completed
    #[arg(long, default_value_t = 0)]
    pub courses: i64,

    /// Certificates earned
    #[arg(long, default_value_t = 0)]
    pub certificates: i64,

    /// On-time loan payments
    #[arg(long, default_value_t = 0)]
    pub on_time_payments: i64,

    /// Late loan payments
    #[arg(long, default_value_t = 0)]
    pub late_payments: i64,

    /// Fully repaid loans
    #[arg(long, default_value_t = 0)]
    pub completed_loans: i64,

    /// Defaulted loans
    #[arg(long, default_value_t = 0)]
    pub defaulted_loans: i64,

    /// Scholarships received
    #[arg(long, default_value_t = 0)]
    pub scholarships: i64,

    /// Total scholarship amount received
    #[arg(long, default_value = "0")]
    pub scholarship_amount: Decimal,

    /// DAO votes cast
    #[arg(long, default_value_t = 0)]
    pub dao_votes: i64,

    /// Students helped
    #[arg(long, default_value_t = 0)]
    pub helped_students: i64,

    /// Days since the EduID was created
    #[arg(long, default_value_t = 0)]
    pub platform_age_days: i64,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Arguments for commands that classify an existing total
#[derive(Args)]
pub struct GradeArgs {
    /// Total LearnScore (0-1000)
    #[arg(long)]
    pub score: u32,
}

#[derive(Args)]
pub struct RiskArgs {
    /// Total LearnScore (0-1000)
    #[arg(long)]
    pub score: u32,
}

#[derive(Args)]
pub struct RateBandArgs {
    /// Total LearnScore (0-1000); omit for an unscored borrower
    #[arg(long)]
    pub score: Option<u32>,
}

impl LearnScoreArgs {
    /// Assessment input built from the individual counter flags.
    fn flag_input(&self) -> AssessmentInput {
        AssessmentInput {
            academic: AcademicActivity {
                gpa: self.gpa,
                courses_completed: self.courses,
                certificates_count: self.certificates,
            },
            repayment: Some(RepaymentActivity {
                on_time_payments: self.on_time_payments,
                late_payments: self.late_payments,
                completed_loans: self.completed_loans,
                defaulted_loans: self.defaulted_loans,
            }),
            scholarship: Some(ScholarshipActivity {
                scholarships_received: self.scholarships,
                total_scholarship_amount: self.scholarship_amount,
            }),
            community: CommunityActivity {
                dao_votes: self.dao_votes,
                helped_students: self.helped_students,
                platform_age_days: self.platform_age_days,
            },
            as_of: self.as_of,
            ..Default::default()
        }
    }
}

pub fn run_learn_score(args: LearnScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment_input: AssessmentInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.flag_input()
    };

    let result = assessment::assess_learn_score(&assessment_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_grade(args: GradeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let score = checked_score(args.score)?;
    let grade = classify_grade(score);
    Ok(json!({
        "score": score,
        "grade": grade,
        "color": grade.color(),
    }))
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let score = checked_score(args.score)?;
    let risk = classify_risk(score);
    Ok(json!({
        "score": score,
        "level": risk.level,
        "color": risk.color,
        "description": risk.description,
    }))
}

pub fn run_rate_band(args: RateBandArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prefill = prefill_rate(args.score);
    let Some(score) = args.score else {
        return Ok(json!({
            "score": Value::Null,
            "prefill_rate": prefill,
            "prefill_rate_bps": percent_to_basis_points(prefill),
        }));
    };

    let score = checked_score(score)?;
    let band = recommended_rate_band(score);
    Ok(json!({
        "score": score,
        "min": band.min,
        "max": band.max,
        "recommended": band.recommended,
        "suggested_rate": suggested_rate(score),
        "prefill_rate": prefill,
        "prefill_rate_bps": percent_to_basis_points(prefill),
    }))
}

/// Scores typed at the command line are user input, so out-of-range totals
/// are rejected here rather than silently clamped.
fn checked_score(score: u32) -> Result<u32, Box<dyn std::error::Error>> {
    if score > 1000 {
        return Err(format!("--score must be between 0 and 1000, got {score}").into());
    }
    Ok(score)
}
