//! Fold per-record ledger histories into the counters the sub-score
//! calculators consume.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::components::{RepaymentActivity, ScholarshipActivity};
use crate::types::{Count, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Funded,
    Active,
    Repaying,
    Completed,
    Defaulted,
    #[serde(other)]
    Other,
}

/// A borrower's loan as recorded on their identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(alias = "loanNftId")]
    pub loan_nft_id: String,
    pub amount: Money,
    pub status: LoanStatus,
    #[serde(alias = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[serde(default, alias = "completedAt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "onTimePayments")]
    pub on_time_payments: Count,
    #[serde(default, alias = "latePayments")]
    pub late_payments: Count,
    #[serde(default)]
    pub defaulted: bool,
}

impl LoanRecord {
    fn is_defaulted(&self) -> bool {
        self.defaulted || self.status == LoanStatus::Defaulted
    }

    fn is_completed(&self) -> bool {
        self.status == LoanStatus::Completed && !self.is_defaulted()
    }
}

/// A scholarship disbursement received from a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    #[serde(alias = "poolId")]
    pub pool_id: String,
    #[serde(alias = "poolName")]
    pub pool_name: String,
    pub amount: Money,
    #[serde(alias = "receivedAt")]
    pub received_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, alias = "transactionHash")]
    pub transaction_hash: String,
}

pub fn repayment_activity(loans: &[LoanRecord]) -> RepaymentActivity {
    loans
        .iter()
        .fold(RepaymentActivity::default(), |mut acc, loan| {
            acc.on_time_payments = acc
                .on_time_payments
                .saturating_add(loan.on_time_payments.max(0));
            acc.late_payments = acc.late_payments.saturating_add(loan.late_payments.max(0));
            if loan.is_completed() {
                acc.completed_loans += 1;
            }
            if loan.is_defaulted() {
                acc.defaulted_loans += 1;
            }
            acc
        })
}

/// Negative record amounts count as zero; the total saturates rather than
/// overflowing.
pub fn scholarship_activity(scholarships: &[ScholarshipRecord]) -> ScholarshipActivity {
    ScholarshipActivity {
        scholarships_received: scholarships.len() as Count,
        total_scholarship_amount: scholarships.iter().fold(Decimal::ZERO, |total, s| {
            total.saturating_add(s.amount.max(Decimal::ZERO))
        }),
    }
}

/// Describe every record field the folds above clamp to zero.
pub fn out_of_domain_records(
    loans: &[LoanRecord],
    scholarships: &[ScholarshipRecord],
) -> Vec<String> {
    let mut notes = Vec::new();

    for (i, loan) in loans.iter().enumerate() {
        for (field, value) in [
            ("on_time_payments", loan.on_time_payments),
            ("late_payments", loan.late_payments),
        ] {
            if value < 0 {
                notes.push(format!("loans[{i}].{field} {value} is negative and was treated as 0"));
            }
        }
    }
    for (i, record) in scholarships.iter().enumerate() {
        if record.amount < Decimal::ZERO {
            notes.push(format!(
                "scholarships[{i}].amount {} is negative and was treated as 0",
                record.amount
            ));
        }
    }

    notes
}

/// Whole days between identity creation and `as_of`, never negative.
pub fn platform_age_days(created_at: DateTime<Utc>, as_of: DateTime<Utc>) -> Count {
    (as_of - created_at).num_days().max(0)
}
