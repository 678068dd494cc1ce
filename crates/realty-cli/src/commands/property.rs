use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_core::financing::amortization::loan_terms;
use realty_core::property::analysis;
use realty_core::property::break_even;
use realty_core::property::growth::{self, GrowthInput};
use realty_core::property::holding_period;
use realty_core::property::params::{
    InvestmentParameters, DEFAULT_CAPITAL_GROWTH, DEFAULT_DOWN_PAYMENT_PCT, DEFAULT_INTEREST_RATE,
    DEFAULT_LOAN_TERM_YEARS, DEFAULT_PROJECTION_YEARS,
};
use realty_core::property::rent_to_emi::{self, RentToEmiInput};

use crate::input;

/// Investment parameters shared by the analysis commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ParamArgs {
    /// Purchase price of the property
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Annual operating expenses (omit to estimate at 4% of price)
    #[arg(long)]
    pub annual_expenses: Option<Decimal>,

    /// Down payment as a percentage of price (20 = 20%)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate (e.g. 0.07 for 7%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Annual rent growth (e.g. 0.025 for 2.5%)
    #[arg(long)]
    pub rent_growth: Option<Decimal>,

    /// Annual capital growth (e.g. 0.055 for 5.5%)
    #[arg(long)]
    pub capital_growth: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl ParamArgs {
    fn to_params(&self) -> Result<InvestmentParameters, Box<dyn std::error::Error>> {
        let mut params = InvestmentParameters::new(
            self.property_price
                .ok_or("--property-price is required (or provide --input)")?,
            self.monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
        );
        if let Some(v) = self.annual_expenses {
            params.annual_expenses = v;
        }
        if let Some(v) = self.down_payment {
            params.down_payment_pct = v;
        }
        if let Some(v) = self.interest_rate {
            params.annual_interest_rate = v;
        }
        if let Some(v) = self.loan_term {
            params.loan_term_years = v;
        }
        if let Some(v) = self.rent_growth {
            params.rent_growth_rate = v;
        }
        if let Some(v) = self.capital_growth {
            params.capital_growth_rate = v;
        }
        if let Some(v) = self.years {
            params.projection_years = v;
        }
        Ok(params)
    }

    fn resolve(&self) -> Result<InvestmentParameters, Box<dyn std::error::Error>> {
        input::resolve(self.input.as_deref(), || self.to_params())
    }
}

/// Arguments for the full investment analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Arguments for holding-period recommendations
#[derive(Args)]
pub struct HoldingPeriodArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Arguments for break-even analysis
#[derive(Args)]
pub struct BreakEvenArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Arguments for a capital growth projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GrowthArgs {
    /// Current property value
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Annual capital growth (e.g. 0.055 for 5.5%)
    #[arg(long, default_value_t = DEFAULT_CAPITAL_GROWTH)]
    pub growth_rate: Decimal,

    /// Projection horizon in years
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    pub years: u32,

    /// Comma-separated growth rates to compare (e.g. 0.03,0.05,0.07)
    #[arg(long, value_delimiter = ',')]
    pub rates: Vec<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for rent-to-EMI coverage
#[derive(Args)]
pub struct RentToEmiArgs {
    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Monthly loan instalment; derived from the loan flags when omitted
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,

    /// Purchase price, used to derive the instalment
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Down payment as a percentage of price (20 = 20%)
    #[arg(long, default_value_t = DEFAULT_DOWN_PAYMENT_PCT)]
    pub down_payment: Decimal,

    /// Annual interest rate (e.g. 0.07 for 7%)
    #[arg(long, default_value_t = DEFAULT_INTEREST_RATE)]
    pub interest_rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    pub loan_term: u32,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.params.resolve()?;
    let result = analysis::analyze(&params)?;
    tracing::info!(
        score = %result.result.investment_score.score,
        elapsed_us = result.metadata.computation_time_us,
        "analysis complete"
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_holding_period(args: HoldingPeriodArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.params.resolve()?;
    let result = holding_period::recommend_holding_period(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.params.resolve()?;
    let result = break_even::analyze_break_even(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let growth_input: GrowthInput = input::resolve(args.input.as_deref(), || {
        Ok(GrowthInput {
            property_price: args
                .property_price
                .ok_or("--property-price is required (or provide --input)")?,
            growth_rate: args.growth_rate,
            years: args.years,
            scenario_rates: args.rates.clone(),
        })
    })?;
    let result = growth::project_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rent_to_emi(args: RentToEmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let coverage_input: RentToEmiInput = input::resolve(args.input.as_deref(), || {
        let monthly_rent = args
            .monthly_rent
            .ok_or("--monthly-rent is required (or provide --input)")?;
        let monthly_payment = match args.monthly_payment {
            Some(payment) => payment,
            None => {
                let price = args
                    .property_price
                    .ok_or("--monthly-payment or --property-price is required")?;
                loan_terms(price, args.down_payment, args.interest_rate, args.loan_term)?
                    .monthly_payment
            }
        };
        Ok(RentToEmiInput {
            monthly_rent,
            monthly_payment,
        })
    })?;
    let result = rent_to_emi::analyze_rent_to_emi(&coverage_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn flags(price: Option<Decimal>, rent: Option<Decimal>) -> ParamArgs {
        ParamArgs {
            property_price: price,
            monthly_rent: rent,
            annual_expenses: None,
            down_payment: None,
            interest_rate: None,
            loan_term: None,
            rent_growth: None,
            capital_growth: None,
            years: None,
            input: None,
        }
    }

    #[test]
    fn test_flags_fill_defaults() {
        let params = flags(Some(dec!(700000)), Some(dec!(2800))).to_params().unwrap();
        assert_eq!(params, InvestmentParameters::new(dec!(700000), dec!(2800)));
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = flags(Some(dec!(500000)), Some(dec!(3000)));
        args.down_payment = Some(dec!(30));
        args.rent_growth = Some(dec!(0.04));
        let params = args.to_params().unwrap();
        assert_eq!(params.down_payment_pct, dec!(30));
        assert_eq!(params.rent_growth_rate, dec!(0.04));
        assert_eq!(params.loan_term_years, 30);
    }

    #[test]
    fn test_missing_price_is_reported() {
        let err = flags(None, Some(dec!(3000))).to_params().unwrap_err();
        assert!(err.to_string().contains("--property-price"));
    }
}
