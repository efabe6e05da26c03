//! Level-payment loan amortization.
//!
//! `amortize` prices the monthly payment and enumerates the full schedule
//! eagerly; `mortgage` is the same engine fed with a purchase price net of
//! the down payment.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinMathResult;

/// Input for a level-payment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate as a percentage (4.5 means 4.5%)
    pub annual_rate_pct: Rate,
    /// Term in monthly periods
    pub term_months: u32,
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// 1-based payment number
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance remaining after this payment
    pub balance: Money,
}

/// Priced loan with its full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutput {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationPeriod>,
}

/// Input for a mortgage quote: a loan on the price net of the down payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: Money,
    pub down_payment: Money,
    /// Nominal annual rate as a percentage
    pub annual_rate_pct: Rate,
    pub term_years: u32,
}

/// Mortgage quote summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// All payments plus the down payment
    pub total_cost: Money,
}

/// Price a level-payment loan and enumerate its amortization schedule.
///
/// `payment = P·r·(1+r)^n / ((1+r)^n − 1)` with monthly `r`; a zero rate
/// falls back to straight-line `P/n`. Each period accrues
/// `interest = balance·r` and retires `payment − interest` of principal.
/// The final period absorbs the accumulated rounding residual so the
/// closing balance is exactly zero and the principal portions sum to the
/// amount borrowed.
pub fn amortize(input: &LoanInput) -> FinMathResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan(input)?;

    let rate = input.annual_rate_pct / Decimal::ONE_HUNDRED / dec!(12);
    let term = Decimal::from(input.term_months);

    let monthly_payment = if rate.is_zero() {
        input.principal / term
    } else {
        let factor = (Decimal::ONE + rate)
            .checked_powd(term)
            .ok_or_else(|| FinMathError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Growth factor overflows decimal range".into(),
            })?;
        let denom = factor - Decimal::ONE;
        if denom.is_zero() {
            return Err(FinMathError::DivisionByZero {
                context: "loan payment annuity factor".into(),
            });
        }
        input.principal * rate * factor / denom
    };

    let mut schedule = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=input.term_months {
        let interest = balance * rate;
        let (payment, principal_paid) = if period == input.term_months {
            // Last payment clears whatever balance remains.
            (balance + interest, balance)
        } else {
            (monthly_payment, monthly_payment - interest)
        };
        balance -= principal_paid;

        total_paid += payment;
        total_interest += interest;

        schedule.push(AmortizationPeriod {
            period,
            payment,
            interest,
            principal: principal_paid,
            balance,
        });
    }

    if input.annual_rate_pct > dec!(20) {
        warnings.push(format!(
            "Annual rate of {}% is unusually high for an amortizing loan",
            input.annual_rate_pct
        ));
    }

    let output = LoanOutput {
        monthly_payment,
        total_paid,
        total_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Quote a mortgage: the amortization engine on `home_price − down_payment`.
pub fn mortgage(input: &MortgageInput) -> FinMathResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();

    if input.home_price <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "home_price".into(),
            reason: format!("Home price must be positive, got {}", input.home_price),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if input.down_payment >= input.home_price {
        return Err(FinMathError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be less than the home price".into(),
        });
    }

    let loan_amount = input.home_price - input.down_payment;
    let loan = amortize(&LoanInput {
        principal: loan_amount,
        annual_rate_pct: input.annual_rate_pct,
        term_months: input
            .term_years
            .checked_mul(12)
            .ok_or_else(|| FinMathError::InvalidInput {
                field: "term_years".into(),
                reason: "Term overflows the month counter".into(),
            })?,
    })?;

    let output = MortgageOutput {
        loan_amount,
        monthly_payment: loan.result.monthly_payment,
        total_interest: loan.result.total_interest,
        total_cost: loan.result.total_paid + input.down_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization on price net of down payment",
        input,
        loan.warnings,
        elapsed,
        output,
    ))
}

fn validate_loan(input: &LoanInput) -> FinMathResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal must be positive, got {}", input.principal),
        });
    }
    if input.term_months == 0 {
        return Err(FinMathError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one period".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Rate cannot be negative, got {}", input.annual_rate_pct),
        });
    }
    Ok(())
}
