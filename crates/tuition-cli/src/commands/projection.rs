use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use tuition_core::projection::{self, ProjectionInput};
use tuition_core::scenario::ScenarioState;

use crate::input;

/// Arguments for the cost projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Year-1 cost before escalation (defaults to 15000)
    #[arg(long)]
    pub annual_cost: Option<Decimal>,

    /// Annual growth rate as a decimal, e.g. 0.04 for 4% (defaults to 0.04)
    #[arg(long)]
    pub growth_rate: Option<Decimal>,

    /// Duration in years; fractional values allowed (defaults to 4)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let defaults = ScenarioState::default();
        ProjectionInput {
            annual_cost: args.annual_cost.unwrap_or(defaults.annual_cost),
            growth_rate: args.growth_rate.unwrap_or(defaults.growth_rate),
            years: args.years.unwrap_or(defaults.years),
        }
    };

    let result = projection::project_costs(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
