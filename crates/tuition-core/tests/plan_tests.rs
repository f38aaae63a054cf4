use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tuition_core::amortization::LoanInput;
use tuition_core::capitalization::CapitalizationSettings;
use tuition_core::plan::{calculate_plan, FundingAdjustments, PlanInput};
use tuition_core::projection::ProjectionInput;

fn default_input() -> PlanInput {
    PlanInput {
        projection: ProjectionInput {
            annual_cost: dec!(15000),
            growth_rate: dec!(0.04),
            years: dec!(4),
        },
        funding: FundingAdjustments::default(),
        capitalization: CapitalizationSettings {
            accrue_during_school: false,
            apr: dec!(0.065),
            grace_months: dec!(6),
        },
        loan: LoanInput {
            apr: dec!(0.065),
            term_years: dec!(10),
        },
    }
}

// ===========================================================================
// Scenario 1: defaults
// ===========================================================================

#[test]
fn test_default_scenario_projection() {
    let out = calculate_plan(&default_input()).unwrap();
    let plan = &out.result;

    assert_eq!(
        plan.per_year,
        vec![dec!(15000), dec!(15600), dec!(16224), dec!(16872.96)]
    );
    assert_eq!(plan.projected_total, dec!(63696.96));
    assert_eq!(plan.total_cost, dec!(63696.96));
    // No override, no cash, no accrual: principal is the projected total.
    assert_eq!(plan.principal, dec!(63696.96));
}

#[test]
fn test_default_scenario_loan_figures() {
    let out = calculate_plan(&default_input()).unwrap();
    let plan = &out.result;

    // Level payment for 63,696.96 at 6.5% over 120 months: ~723.27
    assert!((plan.monthly_payment - dec!(723.27)).abs() < dec!(0.05));
    assert_eq!(plan.schedule.len(), 120);
    assert_eq!(plan.total_interest, plan.total_payments - plan.principal);
    assert!(plan.total_interest > dec!(22000));
    assert!(plan.total_interest < dec!(24000));
}

#[test]
fn test_default_scenario_schedule_invariants() {
    let out = calculate_plan(&default_input()).unwrap();
    let plan = &out.result;

    let mut prev = plan.principal;
    for row in &plan.schedule {
        assert!(row.balance <= prev);
        assert!(row.principal <= prev + dec!(0.000001));
        prev = row.balance;
    }
    assert!(plan.schedule.last().unwrap().balance.abs() < dec!(0.000001));
}

// ===========================================================================
// Scenario 2: upfront cash offsets the principal
// ===========================================================================

#[test]
fn test_cash_offset_reduces_principal_exactly() {
    let base = calculate_plan(&default_input()).unwrap();

    let mut input = default_input();
    input.funding.cash_upfront = Some(dec!(10000));
    let offset = calculate_plan(&input).unwrap();

    assert_eq!(
        offset.result.principal,
        base.result.principal - dec!(10000)
    );
    // Downstream figures recompute from the reduced principal.
    assert!(offset.result.monthly_payment < base.result.monthly_payment);
    assert!(offset.result.total_interest < base.result.total_interest);
    assert_eq!(offset.result.schedule.len(), 120);
}

// ===========================================================================
// Scenario 3: fractional duration
// ===========================================================================

#[test]
fn test_fractional_years_prorated_final_entry() {
    let mut input = default_input();
    input.projection.years = dec!(3.5);
    let out = calculate_plan(&input).unwrap();
    let plan = &out.result;

    assert_eq!(plan.per_year.len(), 4);
    // Last entry is exactly half the 4th full-year escalated cost.
    assert_eq!(plan.per_year[3], dec!(16872.96) * dec!(0.5));
    assert_eq!(
        plan.projected_total,
        dec!(15000) + dec!(15600) + dec!(16224) + dec!(16872.96) * dec!(0.5)
    );
}

// ===========================================================================
// Capitalization end to end
// ===========================================================================

#[test]
fn test_accrual_increases_principal_and_payment() {
    let base = calculate_plan(&default_input()).unwrap();

    let mut input = default_input();
    input.capitalization.accrue_during_school = true;
    let accrued = calculate_plan(&input).unwrap();

    assert!(accrued.result.capitalized_interest > Decimal::ZERO);
    assert_eq!(
        accrued.result.principal,
        base.result.principal + accrued.result.capitalized_interest
    );
    assert!(accrued.result.monthly_payment > base.result.monthly_payment);
}

#[test]
fn test_fresh_result_every_call() {
    let a = calculate_plan(&default_input()).unwrap();
    let b = calculate_plan(&default_input()).unwrap();
    assert_eq!(a.result.monthly_payment, b.result.monthly_payment);
    assert_eq!(a.result.schedule.len(), b.result.schedule.len());
}

#[test]
fn test_plan_serializes_to_json() {
    let out = calculate_plan(&default_input()).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert!(value.get("result").is_some());
    assert!(value["result"].get("schedule").is_some());
}
