use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use tuition_core::scenario::{self, ScenarioState};

use crate::cache;

/// Arguments for sharing scenarios
#[derive(Args)]
pub struct ShareArgs {
    /// Decode this query string and show the resolved scenario instead
    #[arg(long)]
    pub query: Option<String>,

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
}

pub fn run_share(args: ShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    // Decode mode: show what a shared link resolves to.
    if let Some(ref query) = args.query {
        let state = scenario::decode_query(query);
        return Ok(serde_json::json!({
            "state": state,
            "query": scenario::encode_query(&state),
        }));
    }

    // Encode mode: last-used scenario (or defaults), with flag overrides.
    let mut state = cache::load_last_scenario().unwrap_or_default();
    apply_flags(&mut state, &args);

    Ok(serde_json::json!({
        "query": scenario::encode_query(&state),
        "state": state,
    }))
}

fn apply_flags(state: &mut ScenarioState, args: &ShareArgs) {
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
