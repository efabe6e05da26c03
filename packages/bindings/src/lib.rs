use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// TVM
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_tvm(input_json: String) -> NapiResult<String> {
    let input: finmath_core::tvm::TvmInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finmath_core::tvm::solve(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    let input: finmath_core::lending::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finmath_core::lending::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_mortgage(input_json: String) -> NapiResult<String> {
    let input: finmath_core::lending::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finmath_core::lending::mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn accumulate_savings(input_json: String) -> NapiResult<String> {
    let input: finmath_core::savings::AccumulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finmath_core::savings::accumulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn interest_summary(input_json: String) -> NapiResult<String> {
    let input: finmath_core::savings::InterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finmath_core::savings::interest(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
