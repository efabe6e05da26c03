//! Bisection search for the implied period rate.
//!
//! I/Y has no closed form. The residual `f(r) = pv_implied(r) − PV` is
//! bracketed to a sign change and bisected until the currency residual is
//! inside tolerance. A bracketing method is used instead of fixed-step
//! nudging: the nudge loop can oscillate around the root or walk past the
//! bracket entirely on steep residuals.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{annuity, PaymentTiming};
use crate::error::FinMathError;
use crate::types::{Money, Rate};
use crate::FinMathResult;

/// Absolute tolerance on the currency-valued PV residual.
const RATE_TOLERANCE: Decimal = dec!(0.0001);
/// Hard cap on bisection steps.
const MAX_RATE_ITERATIONS: u32 = 1000;
/// Highest per-period rate the bracket may expand to (1000% per period).
const BRACKET_CEILING: Decimal = dec!(10);
/// Lowest per-period rate considered; rates at -100% or below are singular.
const BRACKET_FLOOR: Decimal = dec!(-0.9999);

/// Solve for the per-period rate. Returns the rate and the number of
/// bisection iterations consumed.
pub(super) fn solve_period_rate(
    n: Decimal,
    pv: Money,
    pmt: Money,
    fv: Money,
    timing: PaymentTiming,
) -> FinMathResult<(Rate, u32)> {
    let residual =
        |r: Rate| -> FinMathResult<Decimal> { Ok(annuity::present_value(r, n, fv, pmt, timing)? - pv) };

    let f_zero = residual(Decimal::ZERO)?;
    if f_zero.abs() < RATE_TOLERANCE {
        return Ok((Decimal::ZERO, 0));
    }

    // A positive residual at r = 0 means the implied PV is still above the
    // target, so discounting must increase: the root lies at r > 0.
    let (mut lo, mut hi, mut f_lo) = if f_zero > Decimal::ZERO {
        let hi = expand_upward(&residual, f_zero)?;
        (Decimal::ZERO, hi, f_zero)
    } else {
        let lo = expand_downward(&residual, f_zero)?;
        let f_lo = residual(lo)?;
        (lo, Decimal::ZERO, f_lo)
    };

    let two = dec!(2);
    let mut last_delta = f_zero;

    for i in 1..=MAX_RATE_ITERATIONS {
        let mid = (lo + hi) / two;
        let f_mid = residual(mid)?;
        last_delta = f_mid;

        if f_mid.abs() < RATE_TOLERANCE {
            return Ok((mid, i));
        }

        if (f_mid > Decimal::ZERO) == (f_lo > Decimal::ZERO) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(FinMathError::ConvergenceFailure {
        function: "TVM rate bisection".into(),
        iterations: MAX_RATE_ITERATIONS,
        last_delta,
    })
}

/// Double an upper bound from 1% per period until the residual flips sign.
/// A probe where the growth factor leaves decimal range counts as a
/// bracketing failure, not a caller error.
fn expand_upward(
    residual: &impl Fn(Rate) -> FinMathResult<Decimal>,
    f_zero: Decimal,
) -> FinMathResult<Rate> {
    let mut hi = dec!(0.01);
    while hi <= BRACKET_CEILING {
        let f_hi = match residual(hi) {
            Ok(v) => v,
            Err(_) => break,
        };
        if (f_hi > Decimal::ZERO) != (f_zero > Decimal::ZERO) || f_hi.is_zero() {
            return Ok(hi);
        }
        hi *= dec!(2);
    }
    Err(FinMathError::ConvergenceFailure {
        function: "TVM rate bracketing".into(),
        iterations: 0,
        last_delta: f_zero,
    })
}

/// Mirror of `expand_upward` for roots below zero, floored above -100%.
fn expand_downward(
    residual: &impl Fn(Rate) -> FinMathResult<Decimal>,
    f_zero: Decimal,
) -> FinMathResult<Rate> {
    let mut lo = dec!(-0.01);
    loop {
        let f_lo = match residual(lo) {
            Ok(v) => v,
            Err(_) => break,
        };
        if (f_lo > Decimal::ZERO) != (f_zero > Decimal::ZERO) || f_lo.is_zero() {
            return Ok(lo);
        }
        if lo <= BRACKET_FLOOR {
            break;
        }
        lo = (lo * dec!(2)).max(BRACKET_FLOOR);
    }
    Err(FinMathError::ConvergenceFailure {
        function: "TVM rate bracketing".into(),
        iterations: 0,
        last_delta: f_zero,
    })
}
