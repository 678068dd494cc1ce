use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::property::params::InvestmentParameters;
use crate::property::yields::{purchase_metrics, PurchaseMetrics};
use crate::time_value::{fractional_compound_factor, future_value, scale};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyResult;

/// Longest operational search, in months.
pub const MAX_SEARCH_MONTHS: u32 = 360;
/// Longest total-return search, in years.
pub const MAX_SEARCH_YEARS: u32 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of a bounded break-even search. Running out of horizon is a
/// normal answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Break-even at `period` (months or years, depending on the search)
    Reached { period: u32 },
    /// Not reached within `horizon_years`
    Unresolved { horizon_years: u32 },
}

impl SearchOutcome {
    pub fn period(&self) -> Option<u32> {
        match self {
            SearchOutcome::Reached { period } => Some(*period),
            SearchOutcome::Unresolved { .. } => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, SearchOutcome::Reached { .. })
    }
}

/// Both break-even definitions. Operational answers "when does the property
/// stop needing top-ups"; total return answers "when is the investor whole
/// including appreciation".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Month at which rent-inflated cash flow turns non-negative (0 = already)
    pub operational_months: SearchOutcome,
    /// Operational break-even in years, one decimal place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_years: Option<Decimal>,
    /// Year at which cumulative cash flow plus capital gain covers cash invested
    pub total_return_years: SearchOutcome,
    /// Monthly top-up needed today (0 when cash flow is non-negative)
    pub current_monthly_shortfall: Money,
    pub explanation: String,
}

/// Inputs to the two searches, taken from the purchase metrics.
#[derive(Debug, Clone)]
pub struct BreakEvenInputs {
    pub property_price: Money,
    pub monthly_rent: Money,
    pub monthly_payment: Money,
    pub monthly_expenses: Money,
    pub annual_expenses: Money,
    pub total_cash_invested: Money,
    pub rent_growth_rate: Rate,
    pub capital_growth_rate: Rate,
}

impl BreakEvenInputs {
    pub fn from_metrics(params: &InvestmentParameters, metrics: &PurchaseMetrics) -> Self {
        Self {
            property_price: params.property_price,
            monthly_rent: params.monthly_rent,
            monthly_payment: metrics.loan.monthly_payment,
            monthly_expenses: metrics.cash_flow.monthly_expenses,
            annual_expenses: metrics.yields.annual_expenses,
            total_cash_invested: metrics.cash_flow.total_cash_invested,
            rent_growth_rate: params.rent_growth_rate,
            capital_growth_rate: params.capital_growth_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Break-even analysis for a purchase, wrapped in the computation envelope.
pub fn analyze_break_even(
    params: &InvestmentParameters,
) -> RealtyResult<ComputationOutput<BreakEvenResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let metrics = purchase_metrics(params)?;
    params.push_scale_warnings(&mut warnings);
    let result = compute_break_even(&BreakEvenInputs::from_metrics(params, &metrics))?;
    push_unresolved_warnings(&result, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Operational and Total-Return Break-Even Search",
        params,
        warnings,
        elapsed,
        result,
    ))
}

/// Run both searches.
pub fn compute_break_even(inputs: &BreakEvenInputs) -> RealtyResult<BreakEvenResult> {
    let current_cash_flow = inputs.monthly_rent - inputs.monthly_payment - inputs.monthly_expenses;

    let operational_months = operational_break_even(inputs)?;
    let total_return_years = total_return_break_even(inputs)?;

    let operational_years = operational_months
        .period()
        .map(|m| (Decimal::from(m) / dec!(12)).round_dp(1));

    let current_monthly_shortfall = if current_cash_flow < Decimal::ZERO {
        current_cash_flow.abs()
    } else {
        Decimal::ZERO
    };

    if !operational_months.is_reached() {
        tracing::warn!(
            monthly_cash_flow = %current_cash_flow,
            "operational break-even unresolved within {MAX_SEARCH_MONTHS} months"
        );
    }

    Ok(BreakEvenResult {
        operational_months,
        operational_years,
        total_return_years,
        current_monthly_shortfall,
        explanation: explain(operational_months, total_return_years),
    })
}

pub(crate) fn push_unresolved_warnings(result: &BreakEvenResult, warnings: &mut Vec<String>) {
    if !result.operational_months.is_reached() {
        warnings.push(format!(
            "Monthly cash flow stays negative for {MAX_SEARCH_YEARS} years under the assumed rent growth"
        ));
    }
    if !result.total_return_years.is_reached() {
        warnings.push(format!(
            "Total-return break-even not reached within {MAX_SEARCH_YEARS} years"
        ));
    }
}

// ---------------------------------------------------------------------------
// Searches
// ---------------------------------------------------------------------------

/// First month at which rent, inflated by (1 + g)^(month/12), covers the
/// original instalment and running costs.
fn operational_break_even(inputs: &BreakEvenInputs) -> RealtyResult<SearchOutcome> {
    let fixed_costs = inputs.monthly_payment + inputs.monthly_expenses;

    if inputs.monthly_rent - fixed_costs >= Decimal::ZERO {
        return Ok(SearchOutcome::Reached { period: 0 });
    }

    for month in 1..=MAX_SEARCH_MONTHS {
        let years = Decimal::from(month) / dec!(12);
        let factor = fractional_compound_factor(inputs.rent_growth_rate, years)?;
        let inflated_rent = scale(inputs.monthly_rent, factor)?;
        if inflated_rent - fixed_costs >= Decimal::ZERO {
            return Ok(SearchOutcome::Reached { period: month });
        }
    }

    Ok(SearchOutcome::Unresolved {
        horizon_years: MAX_SEARCH_YEARS,
    })
}

/// First year at which cumulative cash flow plus capital gain covers the
/// cash put in. Rent in year y grows by (1 + g)^(y-1); expenses and debt
/// service stay fixed.
fn total_return_break_even(inputs: &BreakEvenInputs) -> RealtyResult<SearchOutcome> {
    let annual_rent = inputs.monthly_rent * dec!(12);
    let annual_debt_service = inputs.monthly_payment * dec!(12);
    let mut cumulative_cash_flow = Decimal::ZERO;

    for year in 1..=MAX_SEARCH_YEARS {
        let year_rent = future_value(annual_rent, inputs.rent_growth_rate, year - 1)?;
        cumulative_cash_flow += year_rent - inputs.annual_expenses - annual_debt_service;

        let property_value =
            future_value(inputs.property_price, inputs.capital_growth_rate, year)?;
        let capital_gain = property_value - inputs.property_price;

        if cumulative_cash_flow + capital_gain >= inputs.total_cash_invested {
            return Ok(SearchOutcome::Reached { period: year });
        }
    }

    Ok(SearchOutcome::Unresolved {
        horizon_years: MAX_SEARCH_YEARS,
    })
}

fn explain(operational: SearchOutcome, total_return: SearchOutcome) -> String {
    let operational_text = match operational {
        SearchOutcome::Reached { period: 0 } => {
            "Cash flow is non-negative from the first month".to_string()
        }
        SearchOutcome::Reached { period } if period <= 12 => {
            format!("Cash flow turns positive in {period} months due to rent growth")
        }
        SearchOutcome::Reached { period } => format!(
            "Cash flow turns positive in {} years due to rent growth",
            (Decimal::from(period) / dec!(12)).round_dp(1)
        ),
        SearchOutcome::Unresolved { .. } => {
            "Monthly cash flow remains negative (requires ongoing contributions)".to_string()
        }
    };

    let total_text = match total_return {
        SearchOutcome::Reached { period } if period <= 3 => format!(
            "Total investment breaks even in {period} years (including capital gains)"
        ),
        SearchOutcome::Reached { period } if period <= 7 => {
            format!("Total investment breaks even in {period} years with capital growth")
        }
        SearchOutcome::Reached { period } => {
            format!("Total break-even takes {period} years; long-term strategy required")
        }
        SearchOutcome::Unresolved { horizon_years } => {
            format!("Total return break-even not achieved within {horizon_years} years")
        }
    };

    format!("{operational_text} | {total_text}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
