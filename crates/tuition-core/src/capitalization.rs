//! In-school interest accrual on disbursed costs, capitalized at repayment start.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Years};

/// Governs whether, and at what rate, unpaid disbursed cost accrues interest
/// before repayment starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalizationSettings {
    pub accrue_during_school: bool,
    /// Annual accrual rate as a decimal.
    pub apr: Rate,
    /// Months between the end of school and the start of repayment.
    pub grace_months: Decimal,
}

/// Total interest accrued on each year's disbursement from its disbursement
/// date until repayment begins.
///
/// Each disbursement is a separate tranche: money drawn in year 1 accrues
/// interest longer than money drawn in the final year. Tranche `k` (1-indexed)
/// accrues for `t_k = (years - (k-1)) + grace_months/12` years, compounding at
/// the annual rate with a real-valued exponent:
///
/// ```text
/// cap = sum over k of  D_k * ((1 + apr)^t_k - 1)
/// ```
///
/// Returns 0 when accrual is disabled or `apr <= 0`. Tranches with a
/// non-positive amount or non-positive accrual time are skipped.
pub fn capitalized_interest(
    per_year: &[Money],
    years: Years,
    settings: &CapitalizationSettings,
) -> Money {
    if !settings.accrue_during_school || settings.apr <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let grace_years = settings.grace_months / dec!(12);
    let base = Decimal::ONE + settings.apr;

    let mut cap = Decimal::ZERO;
    for (i, amount) in per_year.iter().enumerate() {
        // The pro-rated final entry is still disbursed at its start point.
        let t = years - Decimal::from(i as u32) + grace_years;
        if *amount > Decimal::ZERO && t > Decimal::ZERO {
            cap += amount * (base.powd(t) - Decimal::ONE);
        }
    }
    cap
}
