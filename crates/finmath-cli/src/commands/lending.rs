use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finmath_core::lending::{self, LoanInput, MortgageInput};

use crate::input;

/// Arguments for loan amortization
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 4.5 for 4.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months (exclusive with --term-years)
    #[arg(long, conflicts_with = "term_years")]
    pub term_months: Option<u32>,

    /// Term in years (exclusive with --term-months)
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a mortgage quote
#[derive(Args)]
pub struct MortgageArgs {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment amount
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let term_months = match (args.term_months, args.term_years) {
            (Some(m), _) => m,
            (None, Some(y)) => y
                .checked_mul(12)
                .ok_or("--term-years is too large")?,
            (None, None) => return Err("--term-months or --term-years is required".into()),
        };
        LoanInput {
            principal: args.principal.ok_or("--principal is required")?,
            annual_rate_pct: args.rate.ok_or("--rate is required")?,
            term_months,
        }
    };

    let output = lending::amortize(&loan_input)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            home_price: args.home_price.ok_or("--home-price is required")?,
            down_payment: args.down_payment,
            annual_rate_pct: args.rate.ok_or("--rate is required")?,
            term_years: args.term_years,
        }
    };

    let output = lending::mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(output)?)
}
