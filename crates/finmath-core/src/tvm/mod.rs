//! Time-value-of-money solver.
//!
//! Given four of the five TVM quantities — periods (N), annual rate (I/Y),
//! present value (PV), payment (PMT), future value (FV) — `solve` computes
//! the fifth. FV, PV, PMT and N have closed forms; the rate is found by
//! bisection over the present-value residual.
//!
//! Sign convention: PV, PMT and FV are entered as positive magnitudes
//! accumulating in the same direction, i.e.
//! `FV = PV·(1+r)^n + PMT·((1+r)^n − 1)/r` for an ordinary annuity. The
//! PMT target alone reads as the debt orientation: the level payment that
//! services PV down to a balloon of FV.

pub mod annuity;
mod rate;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::FinMathResult;

/// Which of the five TVM quantities is the unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvmTarget {
    #[serde(rename = "N")]
    Periods,
    #[serde(rename = "IY")]
    Rate,
    #[serde(rename = "PV")]
    PresentValue,
    #[serde(rename = "PMT")]
    Payment,
    #[serde(rename = "FV")]
    FutureValue,
}

/// Ordinary annuity (payments at period end) or annuity due (period start).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTiming {
    #[default]
    End,
    Begin,
}

/// Input parameters for a TVM solve.
///
/// Exactly one quantity (the `target`) is the unknown; its field, if
/// supplied anyway, is ignored. A missing payment is treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvmInput {
    /// The quantity to solve for
    pub target: TvmTarget,
    /// Total number of payment periods (N). May be fractional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Decimal>,
    /// Nominal annual interest rate as a percentage (5 means 5%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Rate>,
    /// Present value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Decimal>,
    /// Periodic payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Decimal>,
    /// Future value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_value: Option<Decimal>,
    /// Payment periods per year (P/Y)
    #[serde(default = "default_frequency")]
    pub periods_per_year: u32,
    /// Compounding periods per year (C/Y)
    #[serde(default = "default_frequency")]
    pub compounds_per_year: u32,
    /// Payment timing within each period
    #[serde(default)]
    pub timing: PaymentTiming,
}

fn default_frequency() -> u32 {
    12
}

/// Output of a TVM solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvmOutput {
    /// The quantity that was solved for
    pub target: TvmTarget,
    /// The solved value: a currency amount for PV/PMT/FV, a period count
    /// for N, an annual percentage for I/Y
    pub value: Decimal,
    /// The per-period rate used (or found, for an I/Y solve)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_rate: Option<Rate>,
    /// Bisection iterations consumed (I/Y solves only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

/// Solve for the target TVM quantity.
///
/// Pure and deterministic: the same input always produces the same output,
/// and no state survives the call.
pub fn solve(input: &TvmInput) -> FinMathResult<ComputationOutput<TvmOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let pv = input.present_value.unwrap_or(Decimal::ZERO);
    let pmt = input.payment.unwrap_or(Decimal::ZERO);
    let fv = input.future_value.unwrap_or(Decimal::ZERO);
    let ppy = Decimal::from(input.periods_per_year);
    let hundred = Decimal::ONE_HUNDRED;

    let (value, period_rate, iterations, methodology) = match input.target {
        TvmTarget::FutureValue => {
            let r = known_period_rate(input)?;
            let n = known_periods(input)?;
            let v = annuity::future_value(r, n, pv, pmt, input.timing)?;
            (v, Some(r), None, "TVM closed form (ordinary annuity growth)")
        }
        TvmTarget::PresentValue => {
            let r = known_period_rate(input)?;
            let n = known_periods(input)?;
            let v = annuity::present_value(r, n, fv, pmt, input.timing)?;
            (v, Some(r), None, "TVM closed form (annuity discounting)")
        }
        TvmTarget::Payment => {
            let r = known_period_rate(input)?;
            let n = known_periods(input)?;
            let v = annuity::payment(r, n, pv, fv, input.timing)?;
            (v, Some(r), None, "TVM closed form (level payment)")
        }
        TvmTarget::Periods => {
            let r = known_period_rate(input)?;
            let v = annuity::periods(r, pv, pmt, fv, input.timing)?;
            if v < Decimal::ZERO {
                warnings.push(format!(
                    "Solved period count is negative ({v}); check cash-flow direction"
                ));
            }
            (v, Some(r), None, "TVM closed form (logarithmic period count)")
        }
        TvmTarget::Rate => {
            let n = known_periods(input)?;
            let (r, iters) = rate::solve_period_rate(n, pv, pmt, fv, input.timing)?;
            let annual_pct = r * ppy * hundred;
            (
                annual_pct,
                Some(r),
                Some(iters),
                "TVM rate via bracketing bisection on the PV residual",
            )
        }
    };

    // The rate field is ignored on an I/Y solve, so it must not warn there.
    if input.target != TvmTarget::Rate {
        if let Some(rate_pct) = input.annual_rate_pct {
            if rate_pct.abs() > Decimal::from(50) {
                warnings.push(format!(
                    "Annual rate of {rate_pct}% is unusually high; verify the rate is a percentage"
                ));
            }
        }
    }

    let output = TvmOutput {
        target: input.target,
        value,
        period_rate,
        iterations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

fn validate(input: &TvmInput) -> FinMathResult<()> {
    if input.periods_per_year == 0 {
        return Err(FinMathError::InvalidInput {
            field: "periods_per_year".into(),
            reason: "Payment frequency must be positive".into(),
        });
    }
    if input.compounds_per_year == 0 {
        return Err(FinMathError::InvalidInput {
            field: "compounds_per_year".into(),
            reason: "Compounding frequency must be positive".into(),
        });
    }
    Ok(())
}

/// Periods when N is a known, not the target.
fn known_periods(input: &TvmInput) -> FinMathResult<Decimal> {
    let n = input.periods.ok_or_else(|| FinMathError::InvalidInput {
        field: "periods".into(),
        reason: "N is required unless it is the solve target".into(),
    })?;
    if n <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "periods".into(),
            reason: format!("N must be positive, got {n}"),
        });
    }
    Ok(n)
}

/// Per-period rate when I/Y is a known, not the target.
fn known_period_rate(input: &TvmInput) -> FinMathResult<Rate> {
    let annual_pct = input
        .annual_rate_pct
        .ok_or_else(|| FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "I/Y is required unless it is the solve target".into(),
        })?;
    let r = annual_pct / Decimal::ONE_HUNDRED / Decimal::from(input.periods_per_year);
    if r <= Decimal::NEGATIVE_ONE {
        return Err(FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Period rate of {r} is at or below -100%"),
        });
    }
    Ok(r)
}
