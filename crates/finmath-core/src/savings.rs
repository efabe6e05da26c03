//! Compound-interest accumulation with periodic contributions.
//!
//! `accumulate` runs the per-period compounding loop and rolls it up into
//! a per-year ledger; `interest` exposes the simple and compound
//! closed forms for a lump sum.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::FinMathResult;

/// Input for contribution-based growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulationInput {
    /// Opening balance
    pub principal: Money,
    /// Nominal annual rate as a percentage (7 means 7%)
    pub annual_rate_pct: Rate,
    /// Whole years to run
    pub years: u32,
    /// Compounding periods per year
    pub compounds_per_year: u32,
    /// Recurring contribution amount
    #[serde(default)]
    pub contribution: Money,
    /// How many times per year the contribution is made
    pub contributions_per_year: u32,
}

/// Per-year rollup of the compounding loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearLedgerEntry {
    /// 1-based year number
    pub year: u32,
    pub start_balance: Money,
    pub contributions: Money,
    pub interest: Money,
    pub end_balance: Money,
}

/// Accumulation result with its yearly ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulationOutput {
    pub final_amount: Money,
    pub total_interest: Money,
    /// Opening principal plus every contribution made
    pub total_contributions: Money,
    pub ledger: Vec<YearLedgerEntry>,
}

/// Input for the lump-sum interest closed forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    pub principal: Money,
    /// Nominal annual rate as a percentage
    pub annual_rate_pct: Rate,
    /// Year count; may be fractional
    pub years: Years,
    /// Compounding periods per year for the compound figure
    pub compounds_per_year: u32,
}

/// Simple and compound interest on the same terms, side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestOutput {
    pub simple_interest: Money,
    pub simple_total: Money,
    pub compound_interest: Money,
    pub compound_total: Money,
}

/// Grow a balance by periodic compounding with recurring contributions.
///
/// Each year runs `compounds_per_year` periods; each period first adds the
/// per-period contribution, then accrues `balance · (rate / compounds)`.
/// The stated contribution is converted to a per-compounding-period amount
/// as `contribution · compounds_per_year / contributions_per_year`.
/// A zero rate is legal and accumulates contributions only.
pub fn accumulate(
    input: &AccumulationInput,
) -> FinMathResult<ComputationOutput<AccumulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_accumulation(input)?;

    let rate = input.annual_rate_pct / Decimal::ONE_HUNDRED;
    let compounds = Decimal::from(input.compounds_per_year);
    let period_rate = rate / compounds;
    let contribution_per_period =
        input.contribution * compounds / Decimal::from(input.contributions_per_year);

    let mut balance = input.principal;
    let mut total_contributions = input.principal;
    let mut ledger = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        let start_balance = balance;
        let mut year_contributions = Decimal::ZERO;
        let mut year_interest = Decimal::ZERO;

        for _period in 0..input.compounds_per_year {
            balance += contribution_per_period;
            year_contributions += contribution_per_period;

            let period_interest = balance * period_rate;
            balance += period_interest;
            year_interest += period_interest;
        }

        total_contributions += year_contributions;
        ledger.push(YearLedgerEntry {
            year,
            start_balance,
            contributions: year_contributions,
            interest: year_interest,
            end_balance: balance,
        });
    }

    if input.annual_rate_pct > dec!(15) {
        warnings.push(format!(
            "Annual return of {}% is well above historical market averages",
            input.annual_rate_pct
        ));
    }

    let output = AccumulationOutput {
        final_amount: balance,
        total_interest: balance - total_contributions,
        total_contributions,
        ledger,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Periodic compounding with level contributions",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Simple (`I = P·r·t`) and compound (`A = P·(1 + r/n)^(n·t)`) interest.
pub fn interest(input: &InterestInput) -> FinMathResult<ComputationOutput<InterestOutput>> {
    let start = Instant::now();

    if input.principal <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal must be positive, got {}", input.principal),
        });
    }
    if input.years <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "years".into(),
            reason: format!("Time period must be positive, got {}", input.years),
        });
    }
    if input.compounds_per_year == 0 {
        return Err(FinMathError::InvalidInput {
            field: "compounds_per_year".into(),
            reason: "Compounding frequency must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Rate cannot be negative, got {}", input.annual_rate_pct),
        });
    }

    let rate = input.annual_rate_pct / Decimal::ONE_HUNDRED;
    let compounds = Decimal::from(input.compounds_per_year);

    let simple_interest = input.principal * rate * input.years;
    let simple_total = input.principal + simple_interest;

    let growth = (Decimal::ONE + rate / compounds)
        .checked_powd(compounds * input.years)
        .ok_or_else(|| FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Growth factor overflows decimal range".into(),
        })?;
    let compound_total = input.principal * growth;
    let compound_interest = compound_total - input.principal;

    let output = InterestOutput {
        simple_interest,
        simple_total,
        compound_interest,
        compound_total,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple and compound interest closed forms",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

fn validate_accumulation(input: &AccumulationInput) -> FinMathResult<()> {
    if input.principal < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal cannot be negative, got {}", input.principal),
        });
    }
    if input.contribution < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "contribution".into(),
            reason: format!("Contribution cannot be negative, got {}", input.contribution),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Rate cannot be negative, got {}", input.annual_rate_pct),
        });
    }
    if input.years == 0 {
        return Err(FinMathError::InvalidInput {
            field: "years".into(),
            reason: "At least one year is required".into(),
        });
    }
    if input.compounds_per_year == 0 {
        return Err(FinMathError::InvalidInput {
            field: "compounds_per_year".into(),
            reason: "Compounding frequency must be positive".into(),
        });
    }
    if input.contributions_per_year == 0 {
        return Err(FinMathError::InvalidInput {
            field: "contributions_per_year".into(),
            reason: "Contribution frequency must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn monthly(principal: Decimal, rate_pct: Decimal, years: u32, contribution: Decimal) -> AccumulationInput {
        AccumulationInput {
            principal,
            annual_rate_pct: rate_pct,
            years,
            compounds_per_year: 12,
            contribution,
            contributions_per_year: 12,
        }
    }

    #[test]
    fn no_contribution_matches_closed_form() {
        let out = accumulate(&monthly(dec!(10000), dec!(6), 10, Decimal::ZERO)).unwrap();
        let closed = dec!(10000) * (Decimal::ONE + dec!(0.06) / dec!(12)).powd(dec!(120));
        assert!((out.result.final_amount - closed).abs() < dec!(0.0001));
    }

    #[test]
    fn ledger_rows_balance() {
        let out = accumulate(&monthly(dec!(5000), dec!(7), 5, dec!(200))).unwrap();
        let ledger = &out.result.ledger;
        assert_eq!(ledger.len(), 5);
        for row in ledger {
            assert_eq!(
                row.end_balance,
                row.start_balance + row.contributions + row.interest
            );
        }
        for pair in ledger.windows(2) {
            assert_eq!(pair[1].start_balance, pair[0].end_balance);
        }
    }

    #[test]
    fn totals_reconcile() {
        let out = accumulate(&monthly(dec!(1000), dec!(5), 3, dec!(100))).unwrap();
        let r = &out.result;
        assert_eq!(r.total_interest, r.final_amount - r.total_contributions);
        // 1000 opening + 100/month for 36 months
        assert_eq!(r.total_contributions, dec!(4600));
    }

    #[test]
    fn zero_rate_accumulates_contributions_only() {
        let out = accumulate(&monthly(dec!(1000), Decimal::ZERO, 2, dec!(50))).unwrap();
        assert_eq!(out.result.final_amount, dec!(2200));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn contribution_frequency_conversion() {
        // Weekly contributions against monthly compounding: each period
        // receives contribution * 12 / 52.
        let input = AccumulationInput {
            principal: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            years: 1,
            compounds_per_year: 12,
            contribution: dec!(130),
            contributions_per_year: 52,
        };
        let out = accumulate(&input).unwrap();
        assert_eq!(out.result.final_amount, dec!(360));
    }

    #[test]
    fn zero_years_rejected() {
        let res = accumulate(&monthly(dec!(1000), dec!(5), 0, Decimal::ZERO));
        assert!(matches!(res, Err(FinMathError::InvalidInput { .. })));
    }

    #[test]
    fn interest_closed_forms() {
        let out = interest(&InterestInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(5),
            years: dec!(3),
            compounds_per_year: 12,
        })
        .unwrap();
        assert_eq!(out.result.simple_interest, dec!(1500));
        assert_eq!(out.result.simple_total, dec!(11500));
        // 10000 * (1 + 0.05/12)^36 ≈ 11614.72
        assert!((out.result.compound_total - dec!(11614.72)).abs() < dec!(0.01));
        assert!(out.result.compound_interest > out.result.simple_interest);
    }

    #[test]
    fn interest_rejects_zero_time() {
        let res = interest(&InterestInput {
            principal: dec!(1000),
            annual_rate_pct: dec!(5),
            years: Decimal::ZERO,
            compounds_per_year: 12,
        });
        assert!(matches!(res, Err(FinMathError::InvalidInput { .. })));
    }
}
