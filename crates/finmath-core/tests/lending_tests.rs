use finmath_core::lending::{amortize, mortgage, LoanInput, MortgageInput};
use finmath_core::FinMathError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(principal: Decimal, rate_pct: Decimal, term_months: u32) -> LoanInput {
    LoanInput {
        principal,
        annual_rate_pct: rate_pct,
        term_months,
    }
}

// ===========================================================================
// Payment pricing
// ===========================================================================

#[test]
fn test_reference_loan_payment() {
    // 250,000 at 4.5% over 360 months ≈ 1266.71
    let out = amortize(&loan(dec!(250000), dec!(4.5), 360)).unwrap();
    assert!(
        (out.result.monthly_payment - dec!(1266.71)).abs() < dec!(0.01),
        "expected ~1266.71, got {}",
        out.result.monthly_payment
    );
}

#[test]
fn test_short_loan_payment() {
    // 10,000 at 6% over 12 months ≈ 860.66
    let out = amortize(&loan(dec!(10000), dec!(6), 12)).unwrap();
    assert!((out.result.monthly_payment - dec!(860.66)).abs() < dec!(0.01));
}

#[test]
fn test_zero_rate_loan_is_straight_line() {
    let out = amortize(&loan(dec!(12000), Decimal::ZERO, 24)).unwrap();
    assert_eq!(out.result.monthly_payment, dec!(500));
    assert_eq!(out.result.total_interest, Decimal::ZERO);
    assert_eq!(out.result.total_paid, dec!(12000));
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_schedule_enumerates_full_term() {
    let out = amortize(&loan(dec!(250000), dec!(4.5), 360)).unwrap();
    assert_eq!(out.result.schedule.len(), 360);
    assert_eq!(out.result.schedule.first().unwrap().period, 1);
    assert_eq!(out.result.schedule.last().unwrap().period, 360);
}

#[test]
fn test_principal_portions_sum_to_principal() {
    let out = amortize(&loan(dec!(250000), dec!(4.5), 360)).unwrap();
    let principal_paid: Decimal = out.result.schedule.iter().map(|p| p.principal).sum();
    assert_eq!(principal_paid, dec!(250000));
}

#[test]
fn test_balance_chains_between_periods() {
    let out = amortize(&loan(dec!(50000), dec!(7.2), 60)).unwrap();
    let schedule = &out.result.schedule;
    let mut expected = dec!(50000);
    for row in schedule {
        expected -= row.principal;
        assert_eq!(row.balance, expected);
        // payment splits exactly into interest + principal
        assert_eq!(row.payment, row.interest + row.principal);
    }
    assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_interest_declines_over_time() {
    let out = amortize(&loan(dec!(100000), dec!(5), 120)).unwrap();
    let schedule = &out.result.schedule;
    assert!(schedule.first().unwrap().interest > schedule.last().unwrap().interest);
}

#[test]
fn test_totals_reconcile() {
    let out = amortize(&loan(dec!(100000), dec!(5), 120)).unwrap();
    let r = &out.result;
    assert_eq!(r.total_interest, r.total_paid - dec!(100000));
}

// ===========================================================================
// Mortgage wrapper
// ===========================================================================

#[test]
fn test_mortgage_quote() {
    let out = mortgage(&MortgageInput {
        home_price: dec!(500000),
        down_payment: dec!(100000),
        annual_rate_pct: dec!(4.5),
        term_years: 30,
    })
    .unwrap();
    assert_eq!(out.result.loan_amount, dec!(400000));
    assert!((out.result.monthly_payment - dec!(2026.74)).abs() < dec!(0.05));
    assert_eq!(
        out.result.total_cost,
        dec!(400000) + out.result.total_interest + dec!(100000)
    );
}

// ===========================================================================
// Error taxonomy
// ===========================================================================

#[test]
fn test_non_positive_principal_rejected() {
    assert!(matches!(
        amortize(&loan(Decimal::ZERO, dec!(5), 12)),
        Err(FinMathError::InvalidInput { .. })
    ));
}

#[test]
fn test_zero_term_rejected() {
    assert!(matches!(
        amortize(&loan(dec!(1000), dec!(5), 0)),
        Err(FinMathError::InvalidInput { .. })
    ));
}

#[test]
fn test_excessive_down_payment_rejected() {
    let res = mortgage(&MortgageInput {
        home_price: dec!(200000),
        down_payment: dec!(250000),
        annual_rate_pct: dec!(4),
        term_years: 30,
    });
    assert!(matches!(res, Err(FinMathError::InvalidInput { .. })));
}

#[test]
fn test_amortize_is_idempotent() {
    let a = amortize(&loan(dec!(250000), dec!(4.5), 360)).unwrap();
    let b = amortize(&loan(dec!(250000), dec!(4.5), 360)).unwrap();
    assert_eq!(a.result.monthly_payment, b.result.monthly_payment);
    assert_eq!(a.result.total_interest, b.result.total_interest);
}
