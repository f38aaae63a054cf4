mod cache;
mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{PaymentArgs, ScheduleArgs};
use commands::plan::PlanArgs;
use commands::projection::ProjectArgs;
use commands::scenario::ShareArgs;

/// College cost projection and student loan planning
#[derive(Parser)]
#[command(
    name = "tuition",
    version,
    about = "College cost projection and student loan planning",
    long_about = "Project multi-year college costs under a compounding growth assumption, \
                  optionally capitalize in-school interest, and compute the level monthly \
                  payment and full amortization schedule for the financed amount. \
                  Scenarios are shareable as query strings and cached between runs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project per-year costs with compounding growth
    Project(ProjectArgs),
    /// Level monthly payment for a principal, APR, and term
    Payment(PaymentArgs),
    /// Full month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Complete plan: projection, capitalization, and loan repayment
    Plan(PlanArgs),
    /// Encode the current scenario as a shareable query string (or decode one)
    Share(ShareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::Share(args) => commands::scenario::run_share(args),
        Commands::Version => {
            println!("tuition {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
