//! Composes projection, capitalization, and amortization into one plan result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{amortization_schedule, monthly_payment, AmortizationRow, LoanInput};
use crate::capitalization::{capitalized_interest, CapitalizationSettings};
use crate::error::TuitionError;
use crate::projection::{per_year_costs, ProjectionInput};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::TuitionResult;

/// Optional total-cost override and upfront cash that reduces the financed
/// principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundingAdjustments {
    /// Replaces the projected total when provided and > 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_override: Option<Money>,
    /// Paid out of pocket before borrowing; floored at 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_upfront: Option<Money>,
}

/// Full input for `calculate_plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub projection: ProjectionInput,
    #[serde(default)]
    pub funding: FundingAdjustments,
    pub capitalization: CapitalizationSettings,
    pub loan: LoanInput,
}

/// Aggregate plan result: cost projection, financed principal, and the full
/// repayment picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    pub per_year: Vec<Money>,
    pub projected_total: Money,
    /// Projected total, or the override when one is in effect.
    pub total_cost: Money,
    pub principal_before_capitalization: Money,
    /// 0 unless in-school accrual is enabled.
    pub capitalized_interest: Money,
    pub principal: Money,
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// Compute the complete plan from current input values.
///
/// Owns the full composition and returns a fresh result on every call; there
/// is no cached state inside the core.
pub fn calculate_plan(input: &PlanInput) -> TuitionResult<ComputationOutput<PlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.projection.annual_cost < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "annual_cost".into(),
            reason: "Year-1 cost must be >= 0".into(),
        });
    }
    if input.projection.growth_rate < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "growth_rate".into(),
            reason: "Growth rate must be >= 0".into(),
        });
    }
    if input.projection.years <= Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "years".into(),
            reason: "Duration must be > 0 years".into(),
        });
    }
    if input.capitalization.apr < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "capitalization.apr".into(),
            reason: "Accrual APR must be >= 0".into(),
        });
    }
    if input.capitalization.grace_months < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "grace_months".into(),
            reason: "Grace period must be >= 0 months".into(),
        });
    }
    if input.loan.apr < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "loan.apr".into(),
            reason: "Loan APR must be >= 0".into(),
        });
    }
    if input.loan.term_years <= Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "term_years".into(),
            reason: "Repayment term must be > 0 years".into(),
        });
    }

    let per_year = per_year_costs(&input.projection);
    let projected_total: Money = per_year.iter().copied().sum();

    let total_cost = match input.funding.total_override {
        Some(override_total) if override_total > Decimal::ZERO => override_total,
        Some(_) => {
            warnings.push("Non-positive total override ignored; using projected total".into());
            projected_total
        }
        None => projected_total,
    };

    let cash = input
        .funding
        .cash_upfront
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let principal_before_cap = (total_cost - cash).max(Decimal::ZERO);
    if cash > total_cost {
        warnings.push("Upfront cash exceeds total cost; nothing to finance".into());
    }

    let cap_interest =
        capitalized_interest(&per_year, input.projection.years, &input.capitalization);
    let principal = if input.capitalization.accrue_during_school {
        principal_before_cap + cap_interest
    } else {
        principal_before_cap
    };

    let payment = monthly_payment(principal, input.loan.apr, input.loan.term_years);
    let schedule = amortization_schedule(principal, input.loan.apr, input.loan.term_years);

    let total_payments: Money = schedule.iter().map(|row| row.payment).sum();
    let total_interest = total_payments - principal;

    let output = PlanOutput {
        per_year,
        projected_total,
        total_cost,
        principal_before_capitalization: principal_before_cap,
        capitalized_interest: if input.capitalization.accrue_during_school {
            cap_interest
        } else {
            Decimal::ZERO
        },
        principal,
        monthly_payment: payment,
        total_payments,
        total_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "College Cost & Loan Plan",
        &serde_json::json!({
            "annual_cost": input.projection.annual_cost.to_string(),
            "growth_rate": input.projection.growth_rate.to_string(),
            "years": input.projection.years.to_string(),
            "accrue_during_school": input.capitalization.accrue_during_school,
            "loan_apr": input.loan.apr.to_string(),
            "term_years": input.loan.term_years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> PlanInput {
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

    #[test]
    fn test_override_replaces_projection() {
        let mut input = base_input();
        input.funding.total_override = Some(dec!(80000));
        let out = calculate_plan(&input).unwrap();
        assert_eq!(out.result.total_cost, dec!(80000));
        assert_eq!(out.result.projected_total, dec!(63696.96));
        assert_eq!(out.result.principal, dec!(80000));
    }

    #[test]
    fn test_non_positive_override_ignored_with_warning() {
        let mut input = base_input();
        input.funding.total_override = Some(Decimal::ZERO);
        let out = calculate_plan(&input).unwrap();
        assert_eq!(out.result.total_cost, dec!(63696.96));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_cash_floors_principal_at_zero() {
        let mut input = base_input();
        input.funding.cash_upfront = Some(dec!(100000));
        let out = calculate_plan(&input).unwrap();
        assert_eq!(out.result.principal, Decimal::ZERO);
        assert_eq!(out.result.monthly_payment, Decimal::ZERO);
        assert!(out.result.schedule.is_empty());
    }

    #[test]
    fn test_negative_cash_treated_as_zero() {
        let mut input = base_input();
        input.funding.cash_upfront = Some(dec!(-500));
        let out = calculate_plan(&input).unwrap();
        assert_eq!(out.result.principal, dec!(63696.96));
    }

    #[test]
    fn test_capitalized_interest_zero_when_accrual_off() {
        let out = calculate_plan(&base_input()).unwrap();
        assert_eq!(out.result.capitalized_interest, Decimal::ZERO);
        assert_eq!(out.result.principal, out.result.principal_before_capitalization);
    }

    #[test]
    fn test_capitalized_interest_folds_into_principal() {
        let mut input = base_input();
        input.capitalization.accrue_during_school = true;
        let out = calculate_plan(&input).unwrap();
        assert!(out.result.capitalized_interest > Decimal::ZERO);
        assert_eq!(
            out.result.principal,
            out.result.principal_before_capitalization + out.result.capitalized_interest
        );
    }

    #[test]
    fn test_rejects_negative_growth() {
        let mut input = base_input();
        input.projection.growth_rate = dec!(-0.01);
        assert!(calculate_plan(&input).is_err());
    }
}
