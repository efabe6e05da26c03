mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lending::{LoanArgs, MortgageArgs};
use commands::savings::{InterestArgs, SavingsArgs};
use commands::tvm::TvmArgs;

/// Time-value-of-money and loan calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "finmath",
    version,
    about = "Time-value-of-money and loan calculations with decimal precision",
    long_about = "A CLI for time-value-of-money solving (N, I/Y, PV, PMT, FV), \
                  level-payment loan amortization with full schedules, mortgage \
                  quotes, and compound-interest savings projections."
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
    /// Solve for one TVM quantity given the other four
    Tvm(TvmArgs),
    /// Price a level-payment loan and print its amortization schedule
    Loan(LoanArgs),
    /// Quote a mortgage on a purchase price net of the down payment
    Mortgage(MortgageArgs),
    /// Project savings growth with periodic contributions
    Savings(SavingsArgs),
    /// Simple vs compound interest on a lump sum
    Interest(InterestArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tvm(args) => commands::tvm::run_tvm(args),
        Commands::Loan(args) => commands::lending::run_loan(args),
        Commands::Mortgage(args) => commands::lending::run_mortgage(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Interest(args) => commands::savings::run_interest(args),
        Commands::Version => {
            println!("finmath {}", env!("CARGO_PKG_VERSION"));
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
