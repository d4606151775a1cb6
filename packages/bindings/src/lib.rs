use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct ScoreBindingInput {
    #[serde(alias = "learnScore", alias = "total")]
    score: u32,
}

#[derive(Deserialize)]
struct PrefillBindingInput {
    #[serde(default, alias = "learnScore", alias = "total")]
    score: Option<u32>,
}

fn parse_score(input_json: &str) -> NapiResult<u32> {
    let input: ScoreBindingInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    Ok(input.score)
}

// ---------------------------------------------------------------------------
// LearnScore
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_learn_score(input_json: String) -> NapiResult<String> {
    let input: edulend_core::learn_score::assessment::AssessmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = edulend_core::learn_score::assessment::assess_learn_score(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_learn_score(input_json: String) -> NapiResult<u32> {
    let components: edulend_core::learn_score::components::LearnScoreComponents =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(edulend_core::learn_score::aggregate::calculate_learn_score(
        &components,
    ))
}

#[napi]
pub fn classify_grade(input_json: String) -> NapiResult<String> {
    let grade = edulend_core::learn_score::grade::classify_grade(parse_score(&input_json)?);
    serde_json::to_string(&serde_json::json!({
        "grade": grade,
        "color": grade.color(),
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn classify_risk(input_json: String) -> NapiResult<String> {
    let risk = edulend_core::learn_score::risk::classify_risk(parse_score(&input_json)?);
    serde_json::to_string(&risk).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

#[napi]
pub fn recommended_rate_band(input_json: String) -> NapiResult<String> {
    let band =
        edulend_core::learn_score::rates::recommended_rate_band(parse_score(&input_json)?);
    serde_json::to_string(&band).map_err(to_napi_error)
}

/// Single suggested APR for a scored borrower, as a decimal string.
#[napi]
pub fn suggested_rate(input_json: String) -> NapiResult<String> {
    let rate = edulend_core::learn_score::rates::suggested_rate(parse_score(&input_json)?);
    Ok(rate.to_string())
}

/// Loan-form pre-fill rate. Accepts `{"score": n}` or `{}` for an unscored
/// borrower and returns the rate as a decimal string.
#[napi]
pub fn prefill_rate(input_json: String) -> NapiResult<String> {
    let input: PrefillBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(edulend_core::learn_score::rates::prefill_rate(input.score).to_string())
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_loan_return(input_json: String) -> NapiResult<String> {
    let input: edulend_core::lending::returns::LoanReturnInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        edulend_core::lending::returns::estimate_loan_return(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lender_expected_return(input_json: String) -> NapiResult<String> {
    let input: edulend_core::lending::returns::LenderReturnInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        edulend_core::lending::returns::estimate_lender_return(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
