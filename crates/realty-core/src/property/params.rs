use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RealtyError;
use crate::financing::amortization::validate_down_payment;
use crate::types::{Money, Percent, Rate};
use crate::RealtyResult;

/// Annual rent inflation assumed when none is supplied.
pub const DEFAULT_RENT_GROWTH: Rate = dec!(0.025);
/// Annual capital growth assumed when none is supplied.
pub const DEFAULT_CAPITAL_GROWTH: Rate = dec!(0.055);
pub const DEFAULT_INTEREST_RATE: Rate = dec!(0.07);
pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;
pub const DEFAULT_DOWN_PAYMENT_PCT: Percent = dec!(20);
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Everything the engine needs to evaluate one purchase.
///
/// Financing terms travel with the request; nothing about a particular
/// analysis is held on a shared calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    /// Purchase price
    pub property_price: Money,
    /// Expected monthly rental income
    pub monthly_rent: Money,
    /// Annual running costs. Zero means "unknown" and is replaced by an estimate.
    #[serde(default)]
    pub annual_expenses: Money,
    /// Deposit as a percentage of price (20 = 20%)
    #[serde(default = "default_down_payment_pct")]
    pub down_payment_pct: Percent,
    /// Annual loan interest rate (0.07 = 7%)
    #[serde(default = "default_interest_rate")]
    pub annual_interest_rate: Rate,
    #[serde(default = "default_loan_term_years")]
    pub loan_term_years: u32,
    /// Annual rent inflation (0.025 = 2.5%)
    #[serde(default = "default_rent_growth")]
    pub rent_growth_rate: Rate,
    /// Annual property value growth (0.055 = 5.5%)
    #[serde(default = "default_capital_growth")]
    pub capital_growth_rate: Rate,
    /// Horizon for the capital growth schedule
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

impl InvestmentParameters {
    /// Parameters for a price and rent with every assumption at its default.
    pub fn new(property_price: Money, monthly_rent: Money) -> Self {
        Self {
            property_price,
            monthly_rent,
            annual_expenses: Decimal::ZERO,
            down_payment_pct: DEFAULT_DOWN_PAYMENT_PCT,
            annual_interest_rate: DEFAULT_INTEREST_RATE,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            rent_growth_rate: DEFAULT_RENT_GROWTH,
            capital_growth_rate: DEFAULT_CAPITAL_GROWTH,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }

    /// Reject inputs that would otherwise be masked by divide-by-zero guards.
    pub fn validate(&self) -> RealtyResult<()> {
        if self.property_price <= Decimal::ZERO {
            return Err(invalid("property_price", "Property price must be positive"));
        }
        if self.monthly_rent < Decimal::ZERO {
            return Err(invalid("monthly_rent", "Monthly rent cannot be negative"));
        }
        if self.annual_expenses < Decimal::ZERO {
            return Err(invalid("annual_expenses", "Annual expenses cannot be negative"));
        }
        validate_down_payment(self.down_payment_pct)?;
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(invalid("annual_interest_rate", "Interest rate cannot be negative"));
        }
        if self.loan_term_years == 0 {
            return Err(invalid("loan_term_years", "Loan term must be at least 1 year"));
        }
        check_growth("rent_growth_rate", self.rent_growth_rate)?;
        check_growth("capital_growth_rate", self.capital_growth_rate)?;
        if self.projection_years == 0 {
            return Err(invalid("projection_years", "Projection must cover at least 1 year"));
        }
        Ok(())
    }

    /// Flag rates that look like whole percentages (7 instead of 0.07).
    pub(crate) fn push_scale_warnings(&self, warnings: &mut Vec<String>) {
        if self.annual_interest_rate > Decimal::ONE {
            warnings.push(format!(
                "Interest rate {} is above 100%; rates are decimal fractions (0.07 = 7%)",
                self.annual_interest_rate
            ));
        }
        for (name, rate) in [
            ("Rent growth", self.rent_growth_rate),
            ("Capital growth", self.capital_growth_rate),
        ] {
            if rate > Decimal::ONE {
                warnings.push(format!(
                    "{name} rate {rate} is above 100% a year; rates are decimal fractions (0.05 = 5%)"
                ));
            }
        }
    }
}

fn check_growth(field: &str, rate: Rate) -> RealtyResult<()> {
    if rate <= dec!(-1) {
        return Err(invalid(field, "Growth rate must be greater than -100%"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> RealtyError {
    RealtyError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn default_down_payment_pct() -> Percent {
    DEFAULT_DOWN_PAYMENT_PCT
}

fn default_interest_rate() -> Rate {
    DEFAULT_INTEREST_RATE
}

fn default_loan_term_years() -> u32 {
    DEFAULT_LOAN_TERM_YEARS
}

fn default_rent_growth() -> Rate {
    DEFAULT_RENT_GROWTH
}

fn default_capital_growth() -> Rate {
    DEFAULT_CAPITAL_GROWTH
}

fn default_projection_years() -> u32 {
    DEFAULT_PROJECTION_YEARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(err: RealtyError) -> String {
        match err {
            RealtyError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_from_json() {
        let params: InvestmentParameters =
            serde_json::from_str(r#"{"property_price": "500000", "monthly_rent": "3000"}"#)
                .unwrap();
        assert_eq!(params, InvestmentParameters::new(dec!(500000), dec!(3000)));
        assert_eq!(params.rent_growth_rate, dec!(0.025));
        assert_eq!(params.capital_growth_rate, dec!(0.055));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let params = InvestmentParameters::new(Decimal::ZERO, dec!(2000));
        assert_eq!(field_of(params.validate().unwrap_err()), "property_price");
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.annual_interest_rate = dec!(-0.01);
        assert_eq!(field_of(params.validate().unwrap_err()), "annual_interest_rate");
    }

    #[test]
    fn test_percentage_style_rate_warns() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.annual_interest_rate = dec!(7);
        params.capital_growth_rate = dec!(1.2);
        assert!(params.validate().is_ok());

        let mut warnings = Vec::new();
        params.push_scale_warnings(&mut warnings);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Interest rate 7"));
        assert!(warnings[1].starts_with("Capital growth rate 1.2"));
    }

    #[test]
    fn test_long_horizons_accepted() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.loan_term_years = 60;
        params.projection_years = 60;
        assert!(params.validate().is_ok());

        let mut warnings = Vec::new();
        params.push_scale_warnings(&mut warnings);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.loan_term_years = 0;
        assert_eq!(field_of(params.validate().unwrap_err()), "loan_term_years");
    }

    #[test]
    fn test_negative_expenses_rejected() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.annual_expenses = dec!(-1);
        assert_eq!(field_of(params.validate().unwrap_err()), "annual_expenses");
    }

    #[test]
    fn test_depreciation_allowed() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.capital_growth_rate = dec!(-0.03);
        assert!(params.validate().is_ok());
        params.capital_growth_rate = dec!(-1);
        assert_eq!(field_of(params.validate().unwrap_err()), "capital_growth_rate");
    }

    #[test]
    fn test_zero_projection_rejected() {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(2000));
        params.projection_years = 0;
        assert_eq!(field_of(params.validate().unwrap_err()), "projection_years");
    }
}
