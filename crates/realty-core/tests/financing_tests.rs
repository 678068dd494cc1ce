use pretty_assertions::assert_eq;
use realty_core::financing::amortization::{self, LoanComparisonInput, MortgageInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization: fixed monthly payment
// ===========================================================================

#[test]
fn test_payment_times_term_covers_principal() {
    let principals = [dec!(50000), dec!(325000), dec!(1200000)];
    let rates = [dec!(0.01), dec!(0.045), dec!(0.07), dec!(0.15)];
    let terms = [5u32, 15, 30];

    for &principal in &principals {
        for &rate in &rates {
            for &term in &terms {
                let payment = amortization::monthly_payment(principal, rate, term).unwrap();
                let paid = payment * Decimal::from(term * 12);
                assert!(
                    paid > principal,
                    "P={principal} r={rate} n={term}: paid {paid} <= principal"
                );
            }
        }
    }
}

#[test]
fn test_zero_rate_repays_exactly_principal() {
    let principal = dec!(240000);
    let payment = amortization::monthly_payment(principal, Decimal::ZERO, 20).unwrap();
    assert_eq!(payment, dec!(1000));
    assert_eq!(payment * dec!(240), principal);
}

#[test]
fn test_known_payment_700k_purchase() {
    // 80% of $700k at 7% over 30 years
    let terms = amortization::loan_terms(dec!(700000), dec!(20), dec!(0.07), 30).unwrap();
    assert!(
        (terms.monthly_payment - dec!(3725.69)).abs() < dec!(1),
        "Expected ~3,725.69, got {}",
        terms.monthly_payment
    );
}

#[test]
fn test_mortgage_envelope() {
    let input = MortgageInput {
        property_price: dec!(800000),
        down_payment_pct: dec!(25),
        annual_interest_rate: dec!(0.06),
        loan_term_years: 25,
    };
    let out = amortization::calculate_mortgage(&input).unwrap();
    assert_eq!(out.result.loan_amount, dec!(600000));
    assert!(out.warnings.is_empty());
}

// ===========================================================================
// Loan comparison
// ===========================================================================

#[test]
fn test_loan_comparison_orders_by_deposit() {
    let input = LoanComparisonInput {
        property_price: dec!(750000),
        down_payment_pcts: vec![dec!(5), dec!(20), dec!(40)],
        annual_interest_rate: dec!(0.065),
        loan_term_years: 30,
    };
    let out = amortization::compare_loans(&input).unwrap();
    let payments: Vec<Decimal> = out
        .result
        .scenarios
        .iter()
        .map(|s| s.monthly_payment)
        .collect();
    assert!(payments.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(out.result.scenarios[1].down_payment, dec!(150000));
}
