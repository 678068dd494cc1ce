use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_core::financing::amortization::{self, LoanComparisonInput, MortgageInput};
use realty_core::property::params::{
    DEFAULT_DOWN_PAYMENT_PCT, DEFAULT_INTEREST_RATE, DEFAULT_LOAN_TERM_YEARS,
};

use crate::input;

/// Arguments for a single mortgage calculation
#[derive(Args)]
pub struct MortgageArgs {
    /// Purchase price of the property
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

/// Arguments for comparing deposit levels on the same property
#[derive(Args)]
pub struct LoanCompareArgs {
    /// Purchase price of the property
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Comma-separated down payment percentages
    #[arg(long, value_delimiter = ',', default_value = "10,20,30")]
    pub down_payments: Vec<Decimal>,

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

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = input::resolve(args.input.as_deref(), || {
        Ok(MortgageInput {
            property_price: args
                .property_price
                .ok_or("--property-price is required (or provide --input)")?,
            down_payment_pct: args.down_payment,
            annual_interest_rate: args.interest_rate,
            loan_term_years: args.loan_term,
        })
    })?;
    let result = amortization::calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_loan_compare(args: LoanCompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: LoanComparisonInput = input::resolve(args.input.as_deref(), || {
        Ok(LoanComparisonInput {
            property_price: args
                .property_price
                .ok_or("--property-price is required (or provide --input)")?,
            down_payment_pcts: args.down_payments.clone(),
            annual_interest_rate: args.interest_rate,
            loan_term_years: args.loan_term,
        })
    })?;
    let result = amortization::compare_loans(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}
