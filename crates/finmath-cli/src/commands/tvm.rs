use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use finmath_core::tvm::{self, PaymentTiming, TvmInput, TvmTarget};

use crate::input;

/// CLI spelling of the five TVM quantities.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    /// Number of periods
    N,
    /// Annual interest rate (%)
    Iy,
    /// Present value
    Pv,
    /// Periodic payment
    Pmt,
    /// Future value
    Fv,
}

impl From<TargetArg> for TvmTarget {
    fn from(t: TargetArg) -> Self {
        match t {
            TargetArg::N => TvmTarget::Periods,
            TargetArg::Iy => TvmTarget::Rate,
            TargetArg::Pv => TvmTarget::PresentValue,
            TargetArg::Pmt => TvmTarget::Payment,
            TargetArg::Fv => TvmTarget::FutureValue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimingArg {
    End,
    Begin,
}

impl From<TimingArg> for PaymentTiming {
    fn from(t: TimingArg) -> Self {
        match t {
            TimingArg::End => PaymentTiming::End,
            TimingArg::Begin => PaymentTiming::Begin,
        }
    }
}

/// Arguments for the TVM solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TvmArgs {
    /// Quantity to solve for
    #[arg(long, value_enum)]
    pub target: Option<TargetArg>,

    /// Total number of payment periods (N)
    #[arg(long)]
    pub periods: Option<Decimal>,

    /// Nominal annual rate as a percentage (I/Y, e.g. 5 for 5%)
    #[arg(long, alias = "iy")]
    pub rate: Option<Decimal>,

    /// Present value (PV)
    #[arg(long)]
    pub pv: Option<Decimal>,

    /// Periodic payment (PMT); omitted means zero
    #[arg(long)]
    pub pmt: Option<Decimal>,

    /// Future value (FV)
    #[arg(long)]
    pub fv: Option<Decimal>,

    /// Payment periods per year (P/Y)
    #[arg(long, default_value = "12")]
    pub periods_per_year: u32,

    /// Compounding periods per year (C/Y)
    #[arg(long, default_value = "12")]
    pub compounds_per_year: u32,

    /// Payment timing within each period
    #[arg(long, value_enum, default_value = "end")]
    pub timing: TimingArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_tvm(args: TvmArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tvm_input: TvmInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TvmInput {
            target: args
                .target
                .ok_or("--target is required (or provide --input)")?
                .into(),
            periods: args.periods,
            annual_rate_pct: args.rate,
            present_value: args.pv,
            payment: args.pmt,
            future_value: args.fv,
            periods_per_year: args.periods_per_year,
            compounds_per_year: args.compounds_per_year,
            timing: args.timing.into(),
        }
    };

    let output = tvm::solve(&tvm_input)?;
    Ok(serde_json::to_value(output)?)
}
