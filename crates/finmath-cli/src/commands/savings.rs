use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finmath_core::savings::{self, AccumulationInput, InterestInput};

use crate::input;

/// Arguments for a savings projection
#[derive(Args)]
pub struct SavingsArgs {
    /// Opening balance
    #[arg(long, default_value = "0")]
    pub principal: Decimal,

    /// Annual interest rate as a percentage (e.g. 7 for 7%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Whole years to project
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding periods per year
    #[arg(long, default_value = "12")]
    pub compounds_per_year: u32,

    /// Recurring contribution amount
    #[arg(long, default_value = "0")]
    pub contribution: Decimal,

    /// Contributions per year
    #[arg(long, default_value = "12")]
    pub contributions_per_year: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the simple/compound interest comparison
#[derive(Args)]
pub struct InterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time period in years; may be fractional
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding periods per year
    #[arg(long, default_value = "12")]
    pub compounds_per_year: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: AccumulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AccumulationInput {
            principal: args.principal,
            annual_rate_pct: args.rate.ok_or("--rate is required")?,
            years: args.years.ok_or("--years is required")?,
            compounds_per_year: args.compounds_per_year,
            contribution: args.contribution,
            contributions_per_year: args.contributions_per_year,
        }
    };

    let output = savings::accumulate(&plan)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let interest_input: InterestInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        InterestInput {
            principal: args.principal.ok_or("--principal is required")?,
            annual_rate_pct: args.rate.ok_or("--rate is required")?,
            years: args.years.ok_or("--years is required")?,
            compounds_per_year: args.compounds_per_year,
        }
    };

    let output = savings::interest(&interest_input)?;
    Ok(serde_json::to_value(output)?)
}
