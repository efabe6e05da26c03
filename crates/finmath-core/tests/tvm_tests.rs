use finmath_core::tvm::{solve, PaymentTiming, TvmInput, TvmTarget};
use finmath_core::FinMathError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(target: TvmTarget) -> TvmInput {
    TvmInput {
        target,
        periods: None,
        annual_rate_pct: None,
        present_value: None,
        payment: None,
        future_value: None,
        periods_per_year: 12,
        compounds_per_year: 12,
        timing: PaymentTiming::End,
    }
}

// ===========================================================================
// Closed-form targets
// ===========================================================================

#[test]
fn test_annuity_future_value_reference() {
    // 500/month at 5% nominal for 120 months ≈ 77,641.14
    let mut i = input(TvmTarget::FutureValue);
    i.periods = Some(dec!(120));
    i.annual_rate_pct = Some(dec!(5));
    i.payment = Some(dec!(500));
    let out = solve(&i).unwrap();
    assert!(
        (out.result.value - dec!(77641.14)).abs() < dec!(0.05),
        "expected ~77641.14, got {}",
        out.result.value
    );
}

#[test]
fn test_lump_sum_pv_fv_round_trip() {
    // FV of a lump sum, then PV of that FV, must return the start value
    // within 1e-9 relative.
    let pv = dec!(10000);
    let mut fwd = input(TvmTarget::FutureValue);
    fwd.periods = Some(dec!(60));
    fwd.annual_rate_pct = Some(dec!(4.8));
    fwd.present_value = Some(pv);
    let fv = solve(&fwd).unwrap().result.value;

    let mut back = input(TvmTarget::PresentValue);
    back.periods = Some(dec!(60));
    back.annual_rate_pct = Some(dec!(4.8));
    back.future_value = Some(fv);
    let recovered = solve(&back).unwrap().result.value;

    assert!(((recovered - pv) / pv).abs() < dec!(0.000000001));
}

#[test]
fn test_amortizing_payment() {
    // The PMT target in debt orientation: 250,000 at 4.5%/12 over 360
    let mut i = input(TvmTarget::Payment);
    i.periods = Some(dec!(360));
    i.annual_rate_pct = Some(dec!(4.5));
    i.present_value = Some(dec!(250000));
    i.future_value = Some(Decimal::ZERO);
    let out = solve(&i).unwrap();
    assert!((out.result.value - dec!(1266.71)).abs() < dec!(0.01));
}

#[test]
fn test_period_count_inverts_future_value() {
    // Growing 10,000 to 20,000 at the doubling rate takes 60 periods
    let mut i = input(TvmTarget::Periods);
    i.annual_rate_pct = Some(dec!(13.9437));
    i.present_value = Some(dec!(10000));
    i.future_value = Some(dec!(20000));
    let out = solve(&i).unwrap();
    assert!(
        (out.result.value - dec!(60)).abs() < dec!(0.01),
        "expected ~60 periods, got {}",
        out.result.value
    );
}

#[test]
fn test_zero_rate_present_value_is_linear() {
    // At zero rate, PV = FV − PMT·n
    let mut i = input(TvmTarget::PresentValue);
    i.periods = Some(dec!(24));
    i.annual_rate_pct = Some(Decimal::ZERO);
    i.future_value = Some(dec!(3400));
    i.payment = Some(dec!(100));
    let out = solve(&i).unwrap();
    assert_eq!(out.result.value, dec!(1000));
}

#[test]
fn test_zero_rate_balloon_payment_is_straight_line() {
    // At zero rate, PMT = (PV + FV)/n
    let mut i = input(TvmTarget::Payment);
    i.periods = Some(dec!(12));
    i.annual_rate_pct = Some(Decimal::ZERO);
    i.present_value = Some(dec!(900));
    i.future_value = Some(dec!(300));
    let out = solve(&i).unwrap();
    assert_eq!(out.result.value, dec!(100));
}

#[test]
fn test_zero_rate_future_value_is_linear() {
    let mut i = input(TvmTarget::FutureValue);
    i.periods = Some(dec!(24));
    i.annual_rate_pct = Some(Decimal::ZERO);
    i.present_value = Some(dec!(1000));
    i.payment = Some(dec!(100));
    let out = solve(&i).unwrap();
    assert_eq!(out.result.value, dec!(3400));
}

// ===========================================================================
// Rate target (bisection)
// ===========================================================================

#[test]
fn test_rate_solve_doubling_scenario() {
    // PV=10000, FV=20000, n=60, monthly: annual rate = 12·(2^(1/60) − 1)
    let mut i = input(TvmTarget::Rate);
    i.periods = Some(dec!(60));
    i.present_value = Some(dec!(10000));
    i.future_value = Some(dec!(20000));
    let out = solve(&i).unwrap();
    assert!(
        (out.result.value - dec!(13.9437)).abs() < dec!(0.001),
        "expected ~13.9437% annual, got {}",
        out.result.value
    );
    assert!(out.result.iterations.is_some());
}

#[test]
fn test_rate_solve_with_payments() {
    // Find the rate, then confirm it reproduces the target PV through
    // the PV closed form.
    let mut i = input(TvmTarget::Rate);
    i.periods = Some(dec!(120));
    i.present_value = Some(dec!(30000));
    i.payment = Some(dec!(250));
    i.future_value = Some(dec!(80000));
    let out = solve(&i).unwrap();
    let r = out.result.period_rate.unwrap();

    let mut check = input(TvmTarget::PresentValue);
    check.periods = Some(dec!(120));
    check.annual_rate_pct = Some(r * dec!(12) * dec!(100));
    check.payment = Some(dec!(250));
    check.future_value = Some(dec!(80000));
    let pv = solve(&check).unwrap().result.value;
    assert!((pv - dec!(30000)).abs() < dec!(0.001));
}

#[test]
fn test_rate_solve_failure_is_classified() {
    // Negative PV against positive FV cannot be bracketed
    let mut i = input(TvmTarget::Rate);
    i.periods = Some(dec!(12));
    i.present_value = Some(dec!(-100));
    i.future_value = Some(dec!(50));
    assert!(matches!(
        solve(&i),
        Err(FinMathError::ConvergenceFailure { .. })
    ));
}

// ===========================================================================
// Error taxonomy and purity
// ===========================================================================

#[test]
fn test_zero_periods_per_year_is_invalid_input() {
    let mut i = input(TvmTarget::FutureValue);
    i.periods = Some(dec!(12));
    i.annual_rate_pct = Some(dec!(5));
    i.present_value = Some(dec!(100));
    i.periods_per_year = 0;
    assert!(matches!(solve(&i), Err(FinMathError::InvalidInput { .. })));
}

#[test]
fn test_missing_periods_is_invalid_input() {
    let mut i = input(TvmTarget::FutureValue);
    i.annual_rate_pct = Some(dec!(5));
    i.present_value = Some(dec!(100));
    assert!(matches!(solve(&i), Err(FinMathError::InvalidInput { .. })));
}

#[test]
fn test_solve_is_idempotent() {
    let mut i = input(TvmTarget::Rate);
    i.periods = Some(dec!(60));
    i.present_value = Some(dec!(10000));
    i.future_value = Some(dec!(20000));
    let a = solve(&i).unwrap();
    let b = solve(&i).unwrap();
    assert_eq!(a.result.value, b.result.value);
    assert_eq!(a.result.iterations, b.result.iterations);
}

#[test]
fn test_input_round_trips_through_json() {
    let mut i = input(TvmTarget::Rate);
    i.periods = Some(dec!(60));
    i.present_value = Some(dec!(10000));
    i.future_value = Some(dec!(20000));
    let json = serde_json::to_string(&i).unwrap();
    let back: TvmInput = serde_json::from_str(&json).unwrap();
    assert_eq!(solve(&i).unwrap().result.value, solve(&back).unwrap().result.value);
}
