use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use tuition_core::amortization::{self, LoanInput};

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Financed principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a decimal, e.g. 0.065 for 6.5%
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Repayment term in years
    #[arg(long)]
    pub term_years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Financed principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a decimal, e.g. 0.065 for 6.5%
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Repayment term in years
    #[arg(long)]
    pub term_years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON shape for `payment`/`schedule`: the loan terms plus the principal.
#[derive(Deserialize)]
struct LoanRequest {
    principal: Decimal,
    #[serde(flatten)]
    loan: LoanInput,
}

fn resolve_request(
    principal: Option<Decimal>,
    apr: Option<Decimal>,
    term_years: Option<Decimal>,
    input_path: Option<&str>,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return Ok(input::file::read_json(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanRequest {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        loan: LoanInput {
            apr: apr.ok_or("--apr is required (or provide --input)")?,
            term_years: term_years.ok_or("--term-years is required (or provide --input)")?,
        },
    })
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(
        args.principal,
        args.apr,
        args.term_years,
        args.input.as_deref(),
    )?;
    let result = amortization::loan_payment(request.principal, &request.loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(
        args.principal,
        args.apr,
        args.term_years,
        args.input.as_deref(),
    )?;
    let result = amortization::build_schedule(request.principal, &request.loan)?;
    Ok(serde_json::to_value(result)?)
}
