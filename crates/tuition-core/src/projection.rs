//! Multi-year cost projection with compounding escalation.
//!
//! Year 1 is unescalated; each subsequent year compounds at the growth rate.
//! A fractional final year is pro-rated at the next escalation step.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TuitionError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::TuitionResult;

/// Input for the cost projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Year-1 cost before any escalation.
    pub annual_cost: Money,
    /// Annual growth rate applied per full year (0.04 = 4%).
    pub growth_rate: Rate,
    /// Duration in years; may be fractional (e.g. 3.5).
    pub years: Years,
}

/// Output of `project_costs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    /// One entry per academic year, last entry pro-rated when `years` is fractional.
    pub per_year: Vec<Money>,
    /// Sum of the per-year sequence.
    pub projected_total: Money,
    pub full_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_year_fraction: Option<Decimal>,
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub(crate) fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Per-year cost sequence: `annual_cost * (1+g)^(y-1)` for each full year `y`,
/// plus a pro-rated entry at the next escalation step when `years` is fractional.
///
/// Total over its domain; degenerate inputs (zero cost, zero growth) yield a
/// flat or zero sequence.
pub fn per_year_costs(input: &ProjectionInput) -> Vec<Money> {
    let full_years = input.years.floor().to_u32().unwrap_or(0);
    let fraction = input.years - input.years.floor();

    let mut rows = Vec::with_capacity(full_years as usize + 1);
    for y in 1..=full_years {
        rows.push(input.annual_cost * compound(input.growth_rate, y - 1));
    }
    if fraction > Decimal::ZERO {
        let next_full = input.annual_cost * compound(input.growth_rate, full_years);
        rows.push(next_full * fraction);
    }
    rows
}

/// Project per-year costs with domain validation and the standard envelope.
pub fn project_costs(
    input: &ProjectionInput,
) -> TuitionResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();

    if input.annual_cost < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "annual_cost".into(),
            reason: "Year-1 cost must be >= 0".into(),
        });
    }
    if input.growth_rate < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "growth_rate".into(),
            reason: "Growth rate must be >= 0".into(),
        });
    }
    if input.years <= Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "years".into(),
            reason: "Duration must be > 0 years".into(),
        });
    }

    let per_year = per_year_costs(input);
    let projected_total: Money = per_year.iter().copied().sum();
    let fraction = input.years - input.years.floor();

    let output = ProjectionOutput {
        per_year,
        projected_total,
        full_years: input.years.floor().to_u32().unwrap_or(0),
        partial_year_fraction: (fraction > Decimal::ZERO).then_some(fraction),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compounding Cost Projection",
        &serde_json::json!({
            "annual_cost": input.annual_cost.to_string(),
            "growth_rate": input.growth_rate.to_string(),
            "years": input.years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
