use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use tuition_core::capitalization::CapitalizationSettings;
use tuition_core::plan::{self, FundingAdjustments, PlanInput};
use tuition_core::scenario::{self, ScenarioState};

use crate::{cache, input};

/// Arguments for the complete plan
#[derive(Args)]
pub struct PlanArgs {
    /// Year-1 cost before escalation
    #[arg(long)]
    pub annual_cost: Option<Decimal>,

    /// Annual growth rate as a decimal, e.g. 0.04 for 4%
    #[arg(long)]
    pub growth_rate: Option<Decimal>,

    /// Duration in years; fractional values allowed
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Nominal annual loan rate as a decimal, e.g. 0.065 for 6.5%
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Repayment term in years
    #[arg(long)]
    pub term_years: Option<Decimal>,

    /// Replace the projected total with a known all-in cost
    #[arg(long)]
    pub total_override: Option<Decimal>,

    /// Cash paid upfront, reducing the financed principal
    #[arg(long)]
    pub cash_upfront: Option<Decimal>,

    /// Accrue interest on each year's disbursement while in school
    #[arg(long)]
    pub accrue_during_school: bool,

    /// Accrual rate during school (defaults to the loan APR)
    #[arg(long)]
    pub accrual_apr: Option<Decimal>,

    /// Months between the end of school and the first payment
    #[arg(long, default_value = "0")]
    pub grace_months: Decimal,

    /// Start from a shared scenario query string, e.g. "cost=15000&growth=4.0"
    #[arg(long)]
    pub from_query: Option<String>,

    /// Do not persist the resolved scenario as the new last-used default
    #[arg(long)]
    pub no_save: bool,

    /// Path to JSON input file with a full plan (overrides flags and cache)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: PlanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        // Precedence: defaults <- cached scenario <- --from-query <- flags.
        let mut state = cache::load_last_scenario().unwrap_or_default();
        if let Some(ref query) = args.from_query {
            scenario::apply_query(&mut state, query);
        }
        apply_flags(&mut state, &args);
        debug!("resolved scenario: {}", scenario::encode_query(&state));

        if !args.no_save {
            cache::save_last_scenario(&state);
        }

        PlanInput {
            projection: state.projection(),
            funding: FundingAdjustments {
                total_override: args.total_override,
                cash_upfront: args.cash_upfront,
            },
            capitalization: CapitalizationSettings {
                accrue_during_school: args.accrue_during_school,
                apr: args.accrual_apr.unwrap_or(state.loan_apr),
                grace_months: args.grace_months,
            },
            loan: state.loan(),
        }
    };

    let result = plan::calculate_plan(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

fn apply_flags(state: &mut ScenarioState, args: &PlanArgs) {
    if let Some(cost) = args.annual_cost {
        state.annual_cost = cost;
    }
    if let Some(growth) = args.growth_rate {
        state.growth_rate = growth;
    }
    if let Some(years) = args.years {
        state.years = years;
    }
    if let Some(apr) = args.apr {
        state.loan_apr = apr;
    }
    if let Some(term) = args.term_years {
        state.term_years = term;
    }
}
