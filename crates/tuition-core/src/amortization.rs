//! Level-payment loan amortization: monthly payment and month-by-month schedule.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TuitionError;
use crate::projection::compound;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::TuitionResult;

/// Repayment loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Nominal annual rate as a decimal; divided by 12 for the monthly rate.
    pub apr: Rate,
    /// Repayment term in years.
    pub term_years: Years,
}

/// One monthly payment: the level payment and its interest/principal split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month number (1-indexed).
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Remaining balance after this payment.
    pub balance: Money,
}

/// Output of `build_schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_payment: Money,
    pub payments: u32,
    pub schedule: Vec<AmortizationRow>,
    pub total_payments: Money,
    pub total_interest: Money,
}

/// Output of `loan_payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub monthly_payment: Money,
    pub payments: u32,
    pub monthly_rate: Rate,
}

/// Number of monthly payments: `round(term_years * 12)`, minimum 1.
/// Midpoint rounds away from zero.
pub fn payment_count(term_years: Years) -> u32 {
    (term_years * dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
        .max(1)
}

/// Level monthly payment via the standard annuity formula.
///
/// Returns 0 for a non-positive principal (no loan needed) and straight-line
/// `principal / n` for a zero-rate loan.
pub fn monthly_payment(principal: Money, apr: Rate, term_years: Years) -> Money {
    let n = payment_count(term_years);
    let r = apr / dec!(12);
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if r.is_zero() {
        return principal / Decimal::from(n);
    }
    let pow = compound(r, n);
    principal * r * pow / (pow - Decimal::ONE)
}

/// Month-by-month amortization schedule at the level payment.
///
/// Every row carries the same payment; only the interest/principal split and
/// the balance change. The principal portion is clipped at the remaining
/// balance, so the final balance lands on exactly 0 and never goes negative.
pub fn amortization_schedule(
    principal: Money,
    apr: Rate,
    term_years: Years,
) -> Vec<AmortizationRow> {
    let n = payment_count(term_years);
    let r = apr / dec!(12);

    let mut rows = Vec::with_capacity(n as usize);
    if principal <= Decimal::ZERO {
        return rows;
    }

    let payment = monthly_payment(principal, apr, term_years);
    let mut balance = principal;

    for month in 1..=n {
        let interest = r * balance;
        let principal_paid = (payment - interest).min(balance);
        balance = (balance - principal_paid).max(Decimal::ZERO);
        rows.push(AmortizationRow {
            month,
            payment,
            interest,
            principal: principal_paid,
            balance,
        });
    }
    rows
}

/// Level monthly payment with domain validation and the standard envelope.
pub fn loan_payment(
    principal: Money,
    loan: &LoanInput,
) -> TuitionResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();

    if loan.apr < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "apr".into(),
            reason: "Loan APR must be >= 0".into(),
        });
    }
    if loan.term_years <= Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "term_years".into(),
            reason: "Repayment term must be > 0 years".into(),
        });
    }

    let output = PaymentOutput {
        monthly_payment: monthly_payment(principal, loan.apr, loan.term_years),
        payments: payment_count(loan.term_years),
        monthly_rate: loan.apr / dec!(12),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Annuity",
        &serde_json::json!({
            "principal": principal.to_string(),
            "apr": loan.apr.to_string(),
            "term_years": loan.term_years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Build a full schedule with domain validation and the standard envelope.
pub fn build_schedule(
    principal: Money,
    loan: &LoanInput,
) -> TuitionResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if loan.apr < Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "apr".into(),
            reason: "Loan APR must be >= 0".into(),
        });
    }
    if loan.term_years <= Decimal::ZERO {
        return Err(TuitionError::InvalidInput {
            field: "term_years".into(),
            reason: "Repayment term must be > 0 years".into(),
        });
    }
    if principal <= Decimal::ZERO {
        warnings.push("Principal is not positive; no loan is needed".into());
    }

    let payment = monthly_payment(principal, loan.apr, loan.term_years);
    let schedule = amortization_schedule(principal, loan.apr, loan.term_years);
    let total_payments: Money = schedule.iter().map(|row| row.payment).sum();
    let financed = principal.max(Decimal::ZERO);

    let output = ScheduleOutput {
        monthly_payment: payment,
        payments: schedule.len() as u32,
        schedule,
        total_payments,
        total_interest: if financed.is_zero() {
            Decimal::ZERO
        } else {
            total_payments - financed
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization",
        &serde_json::json!({
            "principal": principal.to_string(),
            "apr": loan.apr.to_string(),
            "term_years": loan.term_years.to_string(),
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

    const EPSILON: Decimal = dec!(0.000001);

    #[test]
    fn test_payment_count_rounding() {
        assert_eq!(payment_count(dec!(10)), 120);
        assert_eq!(payment_count(dec!(2.5)), 30);
        // round(0.5 * 12) = 6
        assert_eq!(payment_count(dec!(0.5)), 6);
        // Floors to a minimum of one payment
        assert_eq!(payment_count(dec!(0.01)), 1);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(0.065), dec!(10)), Decimal::ZERO);
        assert!(amortization_schedule(Decimal::ZERO, dec!(0.065), dec!(10)).is_empty());
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let rows = amortization_schedule(dec!(1200), Decimal::ZERO, dec!(1));
        assert_eq!(rows.len(), 12);
        for row in &rows {
            assert_eq!(row.payment, dec!(100));
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal, dec!(100));
        }
        assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_invariants() {
        let rows = amortization_schedule(dec!(63696.96), dec!(0.065), dec!(10));
        assert_eq!(rows.len(), 120);

        let mut prev_balance = dec!(63696.96);
        for row in &rows {
            assert!(row.balance <= prev_balance);
            assert!(row.principal <= prev_balance + EPSILON);
            prev_balance = row.balance;
        }
        assert!(rows.last().unwrap().balance.abs() < EPSILON);
    }

    #[test]
    fn test_level_payment_reference_value() {
        // 63,696.96 at 6.5% over 120 months: payment ~ 723.27
        let payment = monthly_payment(dec!(63696.96), dec!(0.065), dec!(10));
        assert!((payment - dec!(723.27)).abs() < dec!(0.05));
    }

    #[test]
    fn test_every_row_same_payment() {
        let rows = amortization_schedule(dec!(20000), dec!(0.05), dec!(5));
        let payment = rows[0].payment;
        assert!(rows.iter().all(|row| row.payment == payment));
    }

    #[test]
    fn test_interest_plus_principal_equals_payment_until_clip() {
        let rows = amortization_schedule(dec!(10000), dec!(0.08), dec!(3));
        // All rows except possibly the last split the payment exactly.
        for row in &rows[..rows.len() - 1] {
            assert!((row.interest + row.principal - row.payment).abs() < EPSILON);
        }
    }

    #[test]
    fn test_build_schedule_envelope() {
        let loan = LoanInput {
            apr: dec!(0.065),
            term_years: dec!(10),
        };
        let out = build_schedule(dec!(63696.96), &loan).unwrap();
        assert_eq!(out.result.payments, 120);
        assert_eq!(
            out.result.total_interest,
            out.result.total_payments - dec!(63696.96)
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_build_schedule_rejects_negative_apr() {
        let loan = LoanInput {
            apr: dec!(-0.01),
            term_years: dec!(10),
        };
        assert!(build_schedule(dec!(1000), &loan).is_err());
    }

    #[test]
    fn test_build_schedule_zero_principal_warns() {
        let loan = LoanInput {
            apr: dec!(0.065),
            term_years: dec!(10),
        };
        let out = build_schedule(Decimal::ZERO, &loan).unwrap();
        assert_eq!(out.result.payments, 0);
        assert_eq!(out.result.monthly_payment, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }
}
