//! Flat simple-interest return figures for loan requests and funding.
//!
//! Interest is charged once on the principal for the whole term; there is no
//! compounding and no amortisation schedule. All monetary outputs are
//! rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::learn_score::rates::{basis_points_to_percent, percent_to_basis_points, prefill_rate};
use crate::{types::*, EduLendError, EduLendResult};

const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanReturnInput {
    pub principal: Money,
    /// APR in percent. When absent the loan-form pre-fill rate is used.
    #[serde(default, alias = "interestRate", skip_serializing_if = "Option::is_none")]
    pub interest_rate_percent: Option<Percent>,
    #[serde(alias = "term", alias = "termMonths")]
    pub term_months: u32,
    /// Borrower's LearnScore, used only to pick the pre-fill rate.
    #[serde(default, alias = "learnScore", skip_serializing_if = "Option::is_none")]
    pub learn_score: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Provided,
    LearnScoreSuggestion,
    PlatformDefault,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanReturnOutput {
    pub rate_used: Percent,
    pub rate_basis_points: BasisPoints,
    pub rate_source: RateSource,
    pub total_repayment: Money,
    pub monthly_payment: Money,
    pub profit: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderReturnInput {
    /// Amount the lender is contributing.
    pub amount: Money,
    /// Loan rate as stored by the contract.
    #[serde(alias = "interestRate", alias = "rateBps")]
    pub rate_bps: BasisPoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderReturnOutput {
    pub rate_percent: Percent,
    pub expected_return: Money,
    pub profit: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Borrower-side figures: total owed, monthly instalment and the interest
/// earned by lenders.
pub fn estimate_loan_return(
    input: &LoanReturnInput,
) -> EduLendResult<ComputationOutput<LoanReturnOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_input(input)?;

    let (rate, rate_source) = match input.interest_rate_percent {
        Some(rate) => (rate, RateSource::Provided),
        None => {
            let source = match input.learn_score {
                Some(score) if score > 0 => RateSource::LearnScoreSuggestion,
                _ => RateSource::PlatformDefault,
            };
            (prefill_rate(input.learn_score), source)
        }
    };

    if rate_source == RateSource::PlatformDefault {
        warnings.push(format!(
            "No interest rate or LearnScore supplied; using the platform default of {rate}%"
        ));
    }

    let rate_fraction = rate / PERCENT;
    let total_repayment = Decimal::ONE
        .checked_add(rate_fraction)
        .and_then(|growth| input.principal.checked_mul(growth))
        .ok_or_else(|| too_large("principal"))?;
    let profit = input
        .principal
        .checked_mul(rate_fraction)
        .ok_or_else(|| too_large("principal"))?;
    let monthly_payment = total_repayment / Decimal::from(input.term_months);

    let output = LoanReturnOutput {
        rate_used: rate,
        rate_basis_points: percent_to_basis_points(rate),
        rate_source,
        total_repayment: to_cents(total_repayment),
        monthly_payment: to_cents(monthly_payment),
        profit: to_cents(profit),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "interest": "simple, charged once on principal",
        "total_repayment": "principal * (1 + rate/100)",
        "monthly_payment": "total_repayment / term_months",
        "profit": "principal * rate/100",
        "rounding": "2 dp, midpoint away from zero",
    });

    Ok(with_metadata(
        "Flat simple-interest loan return estimate",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Lender-side figures for funding `amount` of a loan priced in basis points.
pub fn estimate_lender_return(
    input: &LenderReturnInput,
) -> EduLendResult<ComputationOutput<LenderReturnOutput>> {
    let start = Instant::now();

    if input.amount < Decimal::ZERO {
        return Err(EduLendError::InvalidInput {
            field: "amount".into(),
            reason: "Funding amount cannot be negative.".into(),
        });
    }
    if input.rate_bps < 0 {
        return Err(EduLendError::InvalidInput {
            field: "rate_bps".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }

    let output = LenderReturnOutput {
        rate_percent: basis_points_to_percent(input.rate_bps),
        expected_return: lender_expected_return(input.amount, input.rate_bps)?,
        profit: lender_profit(input.amount, input.rate_bps)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "expected_return": "amount * (1 + bps/10000)",
        "profit": "amount * bps/10000",
    });

    Ok(with_metadata(
        "Lender simple-interest return",
        &assumptions,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// `amount * (1 + bps/10000)`, in cents.
pub fn lender_expected_return(amount: Money, rate_bps: BasisPoints) -> EduLendResult<Money> {
    Decimal::ONE
        .checked_add(basis_points_to_percent(rate_bps) / PERCENT)
        .and_then(|growth| amount.checked_mul(growth))
        .map(to_cents)
        .ok_or_else(|| too_large("amount"))
}

/// `amount * bps/10000`, in cents.
pub fn lender_profit(amount: Money, rate_bps: BasisPoints) -> EduLendResult<Money> {
    amount
        .checked_mul(basis_points_to_percent(rate_bps) / PERCENT)
        .map(to_cents)
        .ok_or_else(|| too_large("amount"))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_loan_input(input: &LoanReturnInput) -> EduLendResult<()> {
    if input.term_months == 0 {
        return Err(EduLendError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be at least one month.".into(),
        });
    }
    if input.principal < Decimal::ZERO {
        return Err(EduLendError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative.".into(),
        });
    }
    if let Some(rate) = input.interest_rate_percent {
        if rate < Decimal::ZERO {
            return Err(EduLendError::InvalidInput {
                field: "interest_rate_percent".into(),
                reason: "Interest rate cannot be negative.".into(),
            });
        }
    }
    Ok(())
}

fn too_large(field: &str) -> EduLendError {
    EduLendError::InvalidInput {
        field: field.into(),
        reason: "value too large to compute a return".into(),
    }
}

fn to_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn twelve_month_loan(rate: Option<Percent>) -> LoanReturnInput {
        LoanReturnInput {
            principal: dec!(5000),
            interest_rate_percent: rate,
            term_months: 12,
            learn_score: None,
        }
    }

    #[test]
    fn test_simple_interest_figures() {
        let out = estimate_loan_return(&twelve_month_loan(Some(dec!(7)))).unwrap();
        let r = &out.result;
        assert_eq!(r.total_repayment, dec!(5350));
        assert_eq!(r.monthly_payment, dec!(445.83));
        assert_eq!(r.profit, dec!(350));
        assert_eq!(r.rate_basis_points, 700);
        assert_eq!(r.rate_source, RateSource::Provided);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_rate_from_learn_score() {
        let mut input = twelve_month_loan(None);
        input.learn_score = Some(785);
        let r = estimate_loan_return(&input).unwrap().result;
        assert_eq!(r.rate_used, dec!(7.0));
        assert_eq!(r.rate_source, RateSource::LearnScoreSuggestion);
        assert_eq!(r.total_repayment, dec!(5350));
    }

    #[test]
    fn test_platform_default_rate() {
        let out = estimate_loan_return(&twelve_month_loan(None)).unwrap();
        assert_eq!(out.result.rate_used, dec!(10.0));
        assert_eq!(out.result.rate_source, RateSource::PlatformDefault);
        assert_eq!(out.result.total_repayment, dec!(5500));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_score_uses_default() {
        let mut input = twelve_month_loan(None);
        input.learn_score = Some(0);
        let r = estimate_loan_return(&input).unwrap().result;
        assert_eq!(r.rate_source, RateSource::PlatformDefault);
    }

    #[test]
    fn test_zero_term_error() {
        let mut input = twelve_month_loan(Some(dec!(7)));
        input.term_months = 0;
        let err = estimate_loan_return(&input).unwrap_err();
        match err {
            EduLendError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput for term_months, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_principal_error() {
        let mut input = twelve_month_loan(Some(dec!(7)));
        input.principal = dec!(-1);
        assert!(matches!(
            estimate_loan_return(&input),
            Err(EduLendError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_rate() {
        let r = estimate_loan_return(&twelve_month_loan(Some(Decimal::ZERO)))
            .unwrap()
            .result;
        assert_eq!(r.total_repayment, dec!(5000));
        assert_eq!(r.profit, Decimal::ZERO);
    }

    #[test]
    fn test_lender_figures() {
        assert_eq!(lender_expected_return(dec!(2000), 700).unwrap(), dec!(2140));
        assert_eq!(lender_expected_return(dec!(1000), 700).unwrap(), dec!(1070));
        assert_eq!(lender_profit(dec!(1500), 450).unwrap(), dec!(67.5));
        assert_eq!(lender_expected_return(dec!(1500), 450).unwrap(), dec!(1567.5));
    }

    #[test]
    fn test_huge_principal_is_rejected() {
        let mut input = twelve_month_loan(Some(dec!(50)));
        input.principal = Decimal::MAX;
        match estimate_loan_return(&input).unwrap_err() {
            EduLendError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput for principal, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_rate_is_rejected() {
        let mut input = twelve_month_loan(Some(Decimal::MAX));
        input.principal = dec!(1000);
        assert!(matches!(
            estimate_loan_return(&input),
            Err(EduLendError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_huge_lender_amount_is_rejected() {
        let err = estimate_lender_return(&LenderReturnInput {
            amount: Decimal::MAX,
            rate_bps: 700,
        })
        .unwrap_err();
        assert!(err.to_string().contains("amount"));
        assert!(lender_profit(Decimal::MAX, BasisPoints::MAX).is_err());
    }

    #[test]
    fn test_lender_envelope() {
        let out = estimate_lender_return(&LenderReturnInput {
            amount: dec!(2000),
            rate_bps: 900,
        })
        .unwrap();
        assert_eq!(out.result.rate_percent, dec!(9));
        assert_eq!(out.result.expected_return, dec!(2180));
        assert_eq!(out.result.profit, dec!(180));
    }

    #[test]
    fn test_lender_negative_amount_error() {
        let err = estimate_lender_return(&LenderReturnInput {
            amount: dec!(-5),
            rate_bps: 700,
        })
        .unwrap_err();
        assert!(err.to_string().contains("amount"));
    }
}
