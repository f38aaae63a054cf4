use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_costs(input_json: String) -> NapiResult<String> {
    let input: tuition_core::projection::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        tuition_core::projection::project_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct LoanBindingInput {
    principal: rust_decimal::Decimal,
    #[serde(flatten)]
    loan: tuition_core::amortization::LoanInput,
}

#[napi]
pub fn loan_payment(input_json: String) -> NapiResult<String> {
    let binding_input: LoanBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        tuition_core::amortization::loan_payment(binding_input.principal, &binding_input.loan)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let binding_input: LoanBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        tuition_core::amortization::build_schedule(binding_input.principal, &binding_input.loan)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_plan(input_json: String) -> NapiResult<String> {
    let input: tuition_core::plan::PlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = tuition_core::plan::calculate_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario codec
// ---------------------------------------------------------------------------

#[napi]
pub fn encode_scenario(state_json: String) -> NapiResult<String> {
    let state: tuition_core::scenario::ScenarioState =
        serde_json::from_str(&state_json).map_err(to_napi_error)?;
    Ok(tuition_core::scenario::encode_query(&state))
}

#[napi]
pub fn decode_scenario(query: String) -> NapiResult<String> {
    let state = tuition_core::scenario::decode_query(&query);
    serde_json::to_string(&state).map_err(to_napi_error)
}
