use edulend_core::learn_score::rates::{basis_points_to_percent, percent_to_basis_points};
use edulend_core::lending::returns::{
    estimate_lender_return, estimate_loan_return, LenderReturnInput, LoanReturnInput, RateSource,
};
use edulend_core::EduLendError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_profit_estimate_scenario() {
    let input = LoanReturnInput {
        principal: dec!(5000),
        interest_rate_percent: Some(dec!(7)),
        term_months: 12,
        learn_score: None,
    };
    let r = estimate_loan_return(&input).unwrap().result;
    assert_eq!(r.total_repayment, dec!(5350));
    assert_eq!(r.monthly_payment, dec!(445.83));
    assert_eq!(r.profit, dec!(350));
}

#[test]
fn test_loan_form_json_uses_score_prefill() {
    let json = r#"{"principal": "8000", "term": 24, "learnScore": 640}"#;
    let input: LoanReturnInput = serde_json::from_str(json).unwrap();
    let r = estimate_loan_return(&input).unwrap().result;
    assert_eq!(r.rate_source, RateSource::LearnScoreSuggestion);
    assert_eq!(r.rate_used, dec!(10.0));
    assert_eq!(r.rate_basis_points, 1000);
    assert_eq!(r.total_repayment, dec!(8800));
    assert_eq!(r.monthly_payment, dec!(366.67));
    assert_eq!(r.profit, dec!(800));
}

#[test]
fn test_zero_term_rejected() {
    let input = LoanReturnInput {
        principal: dec!(1000),
        interest_rate_percent: Some(dec!(5)),
        term_months: 0,
        learn_score: Some(900),
    };
    match estimate_loan_return(&input).unwrap_err() {
        EduLendError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_lender_funding_modal() {
    // 700 bps loan, 2,000 funded
    let out = estimate_lender_return(&LenderReturnInput {
        amount: dec!(2000),
        rate_bps: 700,
    })
    .unwrap();
    assert_eq!(out.result.rate_percent, dec!(7));
    assert_eq!(out.result.expected_return, dec!(2140));
    assert_eq!(out.result.profit, dec!(140));
}

#[test]
fn test_basis_point_conversions_agree() {
    for bps in [0, 500, 725, 1300, 2500] {
        assert_eq!(percent_to_basis_points(basis_points_to_percent(bps)), bps);
    }
}
