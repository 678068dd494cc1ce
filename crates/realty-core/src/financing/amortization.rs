use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyError;
use crate::time_value::{compound_factor, scale};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::RealtyResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a single fixed-rate purchase loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Purchase price of the property
    pub property_price: Money,
    /// Down payment as a percentage of price (20 = 20%)
    pub down_payment_pct: Percent,
    /// Annual interest rate (0.07 = 7%)
    pub annual_interest_rate: Rate,
    /// Amortisation term in years
    pub loan_term_years: u32,
}

/// Financing terms derived from price, deposit and loan parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Cash deposit paid up front
    pub down_payment: Money,
    /// Principal borrowed (price - down payment)
    pub loan_amount: Money,
    /// Fixed monthly instalment (EMI)
    pub monthly_payment: Money,
    /// Twelve monthly instalments
    pub annual_debt_service: Money,
    /// Interest paid over the full term
    pub total_interest: Money,
    /// Loan-to-value ratio (0.80 = 80%)
    pub loan_to_value: Rate,
}

/// Compare several deposit sizes on the same property and loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub property_price: Money,
    /// Down payment percentages to evaluate (e.g. [10, 20, 30])
    pub down_payment_pcts: Vec<Percent>,
    pub annual_interest_rate: Rate,
    pub loan_term_years: u32,
}

/// One row of a loan comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScenario {
    pub down_payment_pct: Percent,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub scenarios: Vec<LoanScenario>,
    /// Interest saved by the largest deposit relative to the smallest
    pub interest_saving_range: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standard fixed-rate amortising payment: P * r(1+r)^n / ((1+r)^n - 1)
/// with r = annual_rate / 12 and n = term_years * 12.
///
/// A non-positive principal needs no payment. A zero rate falls back to
/// straight-line repayment of P / n.
pub fn monthly_payment(principal: Money, annual_rate: Rate, term_years: u32) -> RealtyResult<Money> {
    validate_loan(annual_rate, term_years)?;

    if principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = annual_rate / dec!(12);
    let total_months = term_months(term_years)?;

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    let compound = compound_factor(monthly_rate, total_months)?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(RealtyError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    Ok(principal * monthly_rate * compound / denominator)
}

/// Derive deposit, loan amount and instalment for a purchase.
pub fn loan_terms(
    property_price: Money,
    down_payment_pct: Percent,
    annual_rate: Rate,
    term_years: u32,
) -> RealtyResult<LoanTerms> {
    if property_price <= Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    validate_down_payment(down_payment_pct)?;

    let down_payment = property_price * down_payment_pct / dec!(100);
    let loan_amount = property_price - down_payment;
    let payment = monthly_payment(loan_amount, annual_rate, term_years)?;
    let annual_debt_service = payment * dec!(12);
    let total_interest = if loan_amount.is_zero() {
        Decimal::ZERO
    } else {
        scale(annual_debt_service, Decimal::from(term_years))? - loan_amount
    };

    Ok(LoanTerms {
        down_payment,
        loan_amount,
        monthly_payment: payment,
        annual_debt_service,
        total_interest,
        loan_to_value: loan_amount / property_price,
    })
}

/// Loan terms for a single purchase, wrapped in the computation envelope.
pub fn calculate_mortgage(input: &MortgageInput) -> RealtyResult<ComputationOutput<LoanTerms>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = loan_terms(
        input.property_price,
        input.down_payment_pct,
        input.annual_interest_rate,
        input.loan_term_years,
    )?;

    if terms.loan_to_value > dec!(0.80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — lender mortgage insurance likely",
            terms.loan_to_value * dec!(100)
        ));
    }
    if input.annual_interest_rate > dec!(0.12) {
        warnings.push(format!(
            "Interest rate {:.2}% exceeds 12%; verify loan pricing",
            input.annual_interest_rate * dec!(100)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Amortising Loan",
        input,
        warnings,
        elapsed,
        terms,
    ))
}

/// Compare monthly payment and lifetime interest across deposit sizes.
pub fn compare_loans(
    input: &LoanComparisonInput,
) -> RealtyResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.down_payment_pcts.is_empty() {
        return Err(RealtyError::InvalidInput {
            field: "down_payment_pcts".into(),
            reason: "At least one down payment scenario is required".into(),
        });
    }

    let mut scenarios = Vec::with_capacity(input.down_payment_pcts.len());
    for &pct in &input.down_payment_pcts {
        let terms = loan_terms(
            input.property_price,
            pct,
            input.annual_interest_rate,
            input.loan_term_years,
        )?;
        if pct < dec!(20) {
            warnings.push(format!(
                "{pct}% deposit is below 20% — lender mortgage insurance likely"
            ));
        }
        scenarios.push(LoanScenario {
            down_payment_pct: pct,
            down_payment: terms.down_payment,
            loan_amount: terms.loan_amount,
            monthly_payment: terms.monthly_payment,
            total_interest: terms.total_interest,
        });
    }

    let max_interest = scenarios
        .iter()
        .map(|s| s.total_interest)
        .fold(Decimal::MIN, Decimal::max);
    let min_interest = scenarios
        .iter()
        .map(|s| s.total_interest)
        .fold(Decimal::MAX, Decimal::min);

    let output = LoanComparisonOutput {
        scenarios,
        interest_saving_range: max_interest - min_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Loan Comparison by Down Payment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn term_months(term_years: u32) -> RealtyResult<u32> {
    term_years
        .checked_mul(12)
        .ok_or_else(|| RealtyError::NumericOverflow {
            context: format!("loan term of {term_years} years in months"),
        })
}

fn validate_loan(annual_rate: Rate, term_years: u32) -> RealtyResult<()> {
    if term_years == 0 {
        return Err(RealtyError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_down_payment(down_payment_pct: Percent) -> RealtyResult<()> {
    if down_payment_pct < Decimal::ZERO || down_payment_pct > dec!(100) {
        return Err(RealtyError::InvalidInput {
            field: "down_payment_pct".into(),
            reason: "Down payment must be between 0 and 100 percent".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_sanity() {
        // $560k at 7% over 30 years, expected ~$3,725.69/mo
        let payment = monthly_payment(dec!(560000), dec!(0.07), 30).unwrap();
        assert!(
            (payment - dec!(3725.69)).abs() < dec!(0.5),
            "Monthly payment {payment} outside expected range"
        );
    }

    #[test]
    fn test_zero_rate_payment() {
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, 30).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_non_positive_principal_is_free() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(0.07), 30).unwrap(), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(-5), dec!(0.07), 30).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_rejected() {
        match monthly_payment(dec!(100000), dec!(0.05), 0).unwrap_err() {
            RealtyError::InvalidInput { field, .. } => assert_eq!(field, "loan_term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(monthly_payment(dec!(100000), dec!(-0.01), 30).is_err());
    }

    #[test]
    fn test_term_too_long_for_months_is_overflow() {
        let input = MortgageInput {
            property_price: dec!(500000),
            down_payment_pct: dec!(20),
            annual_interest_rate: dec!(0.05),
            loan_term_years: 400_000_000,
        };
        match calculate_mortgage(&input).unwrap_err() {
            RealtyError::NumericOverflow { context } => assert!(context.contains("400000000")),
            other => panic!("Expected NumericOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_long_terms_are_accepted() {
        let forty = monthly_payment(dec!(400000), dec!(0.06), 40).unwrap();
        let thirty = monthly_payment(dec!(400000), dec!(0.06), 30).unwrap();
        assert!(forty < thirty);

        // 300M years at 0% is 3.6B months: still representable
        let terms = loan_terms(dec!(500000), dec!(20), Decimal::ZERO, 300_000_000).unwrap();
        assert!(terms.monthly_payment > Decimal::ZERO);
    }

    #[test]
    fn test_payments_cover_principal() {
        for (principal, rate, term) in [
            (dec!(100000), dec!(0.03), 15u32),
            (dec!(450000), dec!(0.065), 30),
            (dec!(2500), dec!(0.2), 1),
        ] {
            let payment = monthly_payment(principal, rate, term).unwrap();
            let total = payment * Decimal::from(term * 12);
            assert!(total > principal, "{total} should exceed {principal}");
        }
    }

    #[test]
    fn test_loan_terms_split() {
        let terms = loan_terms(dec!(700000), dec!(20), dec!(0.07), 30).unwrap();
        assert_eq!(terms.down_payment, dec!(140000));
        assert_eq!(terms.loan_amount, dec!(560000));
        assert_eq!(terms.loan_to_value, dec!(0.8));
        assert_eq!(terms.annual_debt_service, terms.monthly_payment * dec!(12));
        assert!(terms.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_cash_purchase_has_no_loan() {
        let terms = loan_terms(dec!(400000), dec!(100), dec!(0.07), 30).unwrap();
        assert_eq!(terms.loan_amount, Decimal::ZERO);
        assert_eq!(terms.monthly_payment, Decimal::ZERO);
        assert_eq!(terms.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_down_payment_out_of_range() {
        assert!(loan_terms(dec!(400000), dec!(120), dec!(0.07), 30).is_err());
        assert!(loan_terms(dec!(400000), dec!(-1), dec!(0.07), 30).is_err());
    }

    #[test]
    fn test_mortgage_high_ltv_warning() {
        let input = MortgageInput {
            property_price: dec!(500000),
            down_payment_pct: dec!(10),
            annual_interest_rate: dec!(0.06),
            loan_term_years: 30,
        };
        let result = calculate_mortgage(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("exceeds 80%")));
        assert_eq!(result.methodology, "Fixed-Rate Amortising Loan");
    }

    #[test]
    fn test_compare_loans_larger_deposit_less_interest() {
        let input = LoanComparisonInput {
            property_price: dec!(600000),
            down_payment_pcts: vec![dec!(10), dec!(20), dec!(30)],
            annual_interest_rate: dec!(0.07),
            loan_term_years: 30,
        };
        let result = compare_loans(&input).unwrap();
        let s = &result.result.scenarios;
        assert_eq!(s.len(), 3);
        assert!(s[0].monthly_payment > s[1].monthly_payment);
        assert!(s[1].total_interest > s[2].total_interest);
        assert_eq!(
            result.result.interest_saving_range,
            s[0].total_interest - s[2].total_interest
        );
        // Only the 10% scenario triggers the deposit warning
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_compare_loans_requires_scenarios() {
        let input = LoanComparisonInput {
            property_price: dec!(600000),
            down_payment_pcts: vec![],
            annual_interest_rate: dec!(0.07),
            loan_term_years: 30,
        };
        assert!(compare_loans(&input).is_err());
    }
}
