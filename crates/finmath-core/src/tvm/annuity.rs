//! Closed-form annuity and lump-sum growth formulas.
//!
//! Every zero-rate singularity is substituted with its algebraic limit
//! rather than surfacing a division error, so callers only see
//! `DivisionByZero` where no finite limit exists.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use super::PaymentTiming;
use crate::error::FinMathError;
use crate::types::{Money, Rate};
use crate::FinMathResult;

/// `(1+r)^n`, validating the base and catching overflow.
fn growth_factor(r: Rate, n: Decimal) -> FinMathResult<Decimal> {
    let base = Decimal::ONE + r;
    if base <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "period_rate".into(),
            reason: format!("Period rate {r} is at or below -100%"),
        });
    }
    base.checked_powd(n)
        .ok_or_else(|| FinMathError::InvalidInput {
            field: "period_rate".into(),
            reason: format!("Growth factor (1 + {r})^{n} overflows decimal range"),
        })
}

/// Annuity-due payments earn one extra period of interest.
fn timing_factor(r: Rate, timing: PaymentTiming) -> Decimal {
    match timing {
        PaymentTiming::End => Decimal::ONE,
        PaymentTiming::Begin => Decimal::ONE + r,
    }
}

/// Future value of a lump sum plus a level payment stream.
///
/// `FV = PV·(1+r)^n + PMT·T·((1+r)^n − 1)/r`, with the `r → 0` limit
/// `PV + PMT·n`.
pub fn future_value(
    r: Rate,
    n: Decimal,
    pv: Money,
    pmt: Money,
    timing: PaymentTiming,
) -> FinMathResult<Money> {
    if r.is_zero() {
        return Ok(pv + pmt * n);
    }
    let factor = growth_factor(r, n)?;
    if pmt.is_zero() {
        return Ok(pv * factor);
    }
    let t = timing_factor(r, timing);
    Ok(pv * factor + pmt * t * (factor - Decimal::ONE) / r)
}

/// Present value implied by a future value and a level payment stream.
///
/// Exact inverse of [`future_value`]: `PV = FV/(1+r)^n − PMT·T·(1−(1+r)^⁻n)/r`,
/// with the `r → 0` limit `FV − PMT·n`.
pub fn present_value(
    r: Rate,
    n: Decimal,
    fv: Money,
    pmt: Money,
    timing: PaymentTiming,
) -> FinMathResult<Money> {
    if r.is_zero() {
        return Ok(fv - pmt * n);
    }
    let factor = growth_factor(r, n)?;
    if factor.is_zero() {
        return Err(FinMathError::DivisionByZero {
            context: "PV discount factor".into(),
        });
    }
    let discounted = fv / factor;
    if pmt.is_zero() {
        return Ok(discounted);
    }
    let t = timing_factor(r, timing);
    Ok(discounted - pmt * t * (Decimal::ONE - Decimal::ONE / factor) / r)
}

/// Level payment that services `pv` down to a balloon of `fv` over `n`
/// periods (debt orientation).
///
/// Three cases: pure sinking fund (`pv == 0`), pure amortization
/// (`fv == 0`), and the general balloon. The `r → 0` limit is
/// straight-line: `FV/n`, `PV/n` and `(PV+FV)/n` respectively.
pub fn payment(
    r: Rate,
    n: Decimal,
    pv: Money,
    fv: Money,
    timing: PaymentTiming,
) -> FinMathResult<Money> {
    if n.is_zero() {
        return Err(FinMathError::DivisionByZero {
            context: "PMT over zero periods".into(),
        });
    }
    if r.is_zero() {
        return Ok((pv + fv) / n);
    }
    let factor = growth_factor(r, n)?;
    let t = timing_factor(r, timing);

    if pv.is_zero() {
        let denom = t * (factor - Decimal::ONE);
        if denom.is_zero() {
            return Err(FinMathError::DivisionByZero {
                context: "PMT sinking-fund denominator".into(),
            });
        }
        return Ok(fv * r / denom);
    }

    let denom = t * (Decimal::ONE - Decimal::ONE / factor);
    if denom.is_zero() {
        return Err(FinMathError::DivisionByZero {
            context: "PMT annuity denominator".into(),
        });
    }
    if fv.is_zero() {
        return Ok(pv * r / denom);
    }
    Ok((pv * r + fv * r / factor) / denom)
}

/// Number of periods needed to grow `pv` (plus payments) into `fv`.
///
/// `N = ln((FV + PMT·T/r)/(PV + PMT·T/r)) / ln(1+r)`, degenerating to
/// `ln(FV/PV)/ln(1+r)` without payments and to `(FV − PV)/PMT·T` at zero
/// rate. A zero rate with no payment leaves N undetermined.
pub fn periods(
    r: Rate,
    pv: Money,
    pmt: Money,
    fv: Money,
    timing: PaymentTiming,
) -> FinMathResult<Decimal> {
    let pmt_t = pmt * timing_factor(r, timing);

    if r.is_zero() {
        if pmt_t.is_zero() {
            return Err(FinMathError::InvalidInput {
                field: "periods".into(),
                reason: "Zero rate with zero payment leaves N undetermined".into(),
            });
        }
        return Ok((fv - pv) / pmt_t);
    }

    let ratio = if pmt.is_zero() {
        if pv.is_zero() {
            return Err(FinMathError::DivisionByZero {
                context: "N log ratio (zero present value)".into(),
            });
        }
        fv / pv
    } else {
        let shift = pmt_t / r;
        let denom = pv + shift;
        if denom.is_zero() {
            return Err(FinMathError::DivisionByZero {
                context: "N log ratio denominator".into(),
            });
        }
        (fv + shift) / denom
    };

    if ratio <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "periods".into(),
            reason: format!("No real period count: log ratio {ratio} is not positive"),
        });
    }

    let base = Decimal::ONE + r;
    if base <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "period_rate".into(),
            reason: format!("Period rate {r} is at or below -100%"),
        });
    }

    Ok(ratio.ln() / base.ln())
}
