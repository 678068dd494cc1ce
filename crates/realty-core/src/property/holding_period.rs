use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::property::growth::project;
use crate::property::params::InvestmentParameters;
use crate::property::yields::{purchase_metrics, PurchaseMetrics};
use crate::time_value::{fractional_compound_factor, future_value};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, Rating};
use crate::RealtyResult;

/// Holding horizons evaluated, in years.
pub const HOLDING_PERIODS: [u32; 6] = [3, 5, 7, 10, 15, 20];

const EXCELLENT_ROI: Percent = dec!(15);
const VERY_GOOD_ROI: Percent = dec!(12);
const GOOD_ROI: Percent = dec!(8);
const FAIR_ROI: Percent = dec!(5);

/// Annualized ROI a 3-year hold needs before it is offered as a strategy.
const SHORT_TERM_MIN_ROI: Percent = dec!(8);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Profit projection for one holding horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingPeriodProjection {
    pub years: u32,
    pub future_value: Money,
    pub capital_gain: Money,
    /// Sum of yearly (inflated rent - expenses - debt service)
    pub total_cash_flow: Money,
    /// Capital gain + total cash flow
    pub total_profit: Money,
    /// Total profit / down payment, as a percentage
    pub roi_pct: Percent,
    pub annualized_roi_pct: Percent,
    pub category: Rating,
    pub recommendation: String,
}

/// A suggested holding strategy drawn from one of the horizons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingStrategy {
    pub strategy: String,
    pub years: u32,
    pub total_profit: Money,
    pub annualized_roi_pct: Percent,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingPeriodResult {
    /// One projection per entry of [`HOLDING_PERIODS`], in order
    pub periods: Vec<HoldingPeriodProjection>,
    /// First horizon with positive total profit
    pub profit_break_even_years: Option<u32>,
    /// First horizon with positive cumulative cash flow
    pub cash_flow_break_even_years: Option<u32>,
    pub strategies: Vec<HoldingStrategy>,
    pub initial_investment: Money,
    pub capital_growth_rate: Rate,
}

/// Fixed quantities shared by every horizon.
#[derive(Debug, Clone)]
struct HorizonContext {
    property_price: Money,
    annual_rent: Money,
    annual_expenses: Money,
    annual_debt_service: Money,
    down_payment: Money,
    rent_growth_rate: Rate,
    capital_growth_rate: Rate,
}

impl HorizonContext {
    fn new(params: &InvestmentParameters, metrics: &PurchaseMetrics) -> Self {
        Self {
            property_price: params.property_price,
            annual_rent: metrics.yields.annual_rent,
            annual_expenses: metrics.yields.annual_expenses,
            annual_debt_service: metrics.loan.annual_debt_service,
            down_payment: metrics.loan.down_payment,
            rent_growth_rate: params.rent_growth_rate,
            capital_growth_rate: params.capital_growth_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Holding-period recommendations for a purchase, wrapped in the computation envelope.
pub fn recommend_holding_period(
    params: &InvestmentParameters,
) -> RealtyResult<ComputationOutput<HoldingPeriodResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let metrics = purchase_metrics(params)?;
    params.push_scale_warnings(&mut warnings);
    let result = compute_holding_periods(params, &metrics)?;
    push_roi_warnings(&metrics, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Holding Period Return Projection",
        params,
        warnings,
        elapsed,
        result,
    ))
}

/// Evaluate every horizon in [`HOLDING_PERIODS`].
pub fn compute_holding_periods(
    params: &InvestmentParameters,
    metrics: &PurchaseMetrics,
) -> RealtyResult<HoldingPeriodResult> {
    let ctx = HorizonContext::new(params, metrics);

    let periods = HOLDING_PERIODS
        .iter()
        .map(|&years| evaluate_horizon(&ctx, years))
        .collect::<RealtyResult<Vec<_>>>()?;

    let profit_break_even_years = periods
        .iter()
        .find(|p| p.total_profit > Decimal::ZERO)
        .map(|p| p.years);
    let cash_flow_break_even_years = periods
        .iter()
        .find(|p| p.total_cash_flow > Decimal::ZERO)
        .map(|p| p.years);

    let strategies = build_strategies(&periods);

    Ok(HoldingPeriodResult {
        periods,
        profit_break_even_years,
        cash_flow_break_even_years,
        strategies,
        initial_investment: ctx.down_payment,
        capital_growth_rate: ctx.capital_growth_rate,
    })
}

/// Profit projection for an arbitrary horizon, on the same basis as the
/// fixed holding periods.
pub fn project_total_return(
    params: &InvestmentParameters,
    metrics: &PurchaseMetrics,
    years: u32,
) -> RealtyResult<HoldingPeriodProjection> {
    evaluate_horizon(&HorizonContext::new(params, metrics), years)
}

/// Annualized return on the down payment.
///
/// With `ratio = total_profit / down_payment`:
/// - no down payment gives 0;
/// - a non-negative ratio gives `(ratio^(1/years) - 1) * 100`;
/// - a negative ratio has no real root, so the simple average
///   `ratio / years * 100` is reported instead.
pub fn annualized_roi_pct(
    total_profit: Money,
    down_payment: Money,
    years: u32,
) -> RealtyResult<Percent> {
    if down_payment <= Decimal::ZERO || years == 0 {
        return Ok(Decimal::ZERO);
    }

    let ratio = total_profit / down_payment;
    let years = Decimal::from(years);

    if ratio < Decimal::ZERO {
        return Ok(ratio / years * dec!(100));
    }
    if ratio.is_zero() {
        return Ok(dec!(-100));
    }

    let root = fractional_compound_factor(ratio - Decimal::ONE, Decimal::ONE / years)?;
    Ok((root - Decimal::ONE) * dec!(100))
}

pub fn categorize_roi(annualized_roi_pct: Percent) -> Rating {
    if annualized_roi_pct >= EXCELLENT_ROI {
        Rating::Excellent
    } else if annualized_roi_pct >= VERY_GOOD_ROI {
        Rating::VeryGood
    } else if annualized_roi_pct >= GOOD_ROI {
        Rating::Good
    } else if annualized_roi_pct >= FAIR_ROI {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

pub(crate) fn push_roi_warnings(metrics: &PurchaseMetrics, warnings: &mut Vec<String>) {
    if metrics.loan.down_payment <= Decimal::ZERO {
        warnings.push("No down payment: ROI on equity is undefined and reported as 0".into());
    }
}

// ---------------------------------------------------------------------------
// Horizon evaluation
// ---------------------------------------------------------------------------

fn evaluate_horizon(ctx: &HorizonContext, years: u32) -> RealtyResult<HoldingPeriodProjection> {
    let growth = project(ctx.property_price, ctx.capital_growth_rate, years)?;

    let mut total_cash_flow = Decimal::ZERO;
    for year in 1..=years {
        let year_rent = future_value(ctx.annual_rent, ctx.rent_growth_rate, year - 1)?;
        total_cash_flow += year_rent - ctx.annual_expenses - ctx.annual_debt_service;
    }

    let total_profit = growth.total_gain + total_cash_flow;
    let roi_pct = if ctx.down_payment <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total_profit / ctx.down_payment * dec!(100)
    };
    let annualized = annualized_roi_pct(total_profit, ctx.down_payment, years)?;
    let category = categorize_roi(annualized);

    Ok(HoldingPeriodProjection {
        years,
        future_value: growth.final_value,
        capital_gain: growth.total_gain,
        total_cash_flow,
        total_profit,
        roi_pct,
        annualized_roi_pct: annualized,
        category,
        recommendation: horizon_recommendation(category, years),
    })
}

fn horizon_recommendation(category: Rating, years: u32) -> String {
    match category {
        Rating::Excellent => {
            format!("Outstanding returns - strongly consider holding for {years} years")
        }
        Rating::VeryGood => format!("Strong returns - excellent holding period of {years} years"),
        Rating::Good => format!("Solid returns - good {years}-year investment strategy"),
        Rating::Fair => {
            format!("Moderate returns over {years} years - consider your alternatives")
        }
        Rating::Poor => format!("Low returns over {years} years - not recommended"),
    }
}

fn build_strategies(periods: &[HoldingPeriodProjection]) -> Vec<HoldingStrategy> {
    let at = |years: u32| periods.iter().find(|p| p.years == years);
    let mut strategies = Vec::new();

    if let Some(p) = at(3).filter(|p| p.annualized_roi_pct >= SHORT_TERM_MIN_ROI) {
        strategies.push(strategy(
            "Short-term Strategy",
            p,
            format!("Quick returns for {:.1}% annual returns", p.annualized_roi_pct),
        ));
    }
    if let Some(p) = at(5) {
        strategies.push(strategy(
            "Medium-term Investment",
            p,
            format!("Balanced approach for {:.1}% annual returns", p.annualized_roi_pct),
        ));
    }
    if let Some(p) = at(10) {
        strategies.push(strategy(
            "Long-term Wealth Building",
            p,
            format!(
                "Maximum wealth accumulation with {:.1}% annual returns",
                p.annualized_roi_pct
            ),
        ));
    }

    strategies
}

fn strategy(name: &str, p: &HoldingPeriodProjection, description: String) -> HoldingStrategy {
    HoldingStrategy {
        strategy: name.to_string(),
        years: p.years,
        total_profit: p.total_profit,
        annualized_roi_pct: p.annualized_roi_pct,
        description,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_params() -> InvestmentParameters {
        let mut params = InvestmentParameters::new(dec!(500000), dec!(3000));
        params.down_payment_pct = dec!(30);
        params
    }

    fn result_for(params: &InvestmentParameters) -> HoldingPeriodResult {
        let metrics = purchase_metrics(params).unwrap();
        compute_holding_periods(params, &metrics).unwrap()
    }

    #[test]
    fn test_fixed_horizons_in_order() {
        let result = result_for(&sample_params());
        let years: Vec<u32> = result.periods.iter().map(|p| p.years).collect();
        assert_eq!(years, HOLDING_PERIODS.to_vec());
    }

    #[test]
    fn test_ten_year_gain_matches_growth_projection() {
        let params = sample_params();
        let result = result_for(&params);
        let ten = result.periods.iter().find(|p| p.years == 10).unwrap();
        let growth = project(params.property_price, params.capital_growth_rate, 10).unwrap();
        assert_eq!(ten.capital_gain, growth.total_gain);
        assert_eq!(ten.future_value, growth.final_value);
    }

    #[test]
    fn test_profit_is_gain_plus_cash_flow() {
        let result = result_for(&sample_params());
        for p in &result.periods {
            assert_eq!(p.total_profit, p.capital_gain + p.total_cash_flow);
        }
    }

    #[test]
    fn test_cash_flow_sum_without_growth() {
        let mut params = InvestmentParameters::new(dec!(300000), dec!(2000));
        params.down_payment_pct = dec!(100);
        params.annual_expenses = dec!(6000);
        params.rent_growth_rate = Decimal::ZERO;
        let result = result_for(&params);
        // (24000 - 6000) per year, no debt service
        assert_eq!(result.periods[0].total_cash_flow, dec!(54000));
        assert_eq!(result.cash_flow_break_even_years, Some(3));
        assert_eq!(result.profit_break_even_years, Some(3));
    }

    #[test]
    fn test_annualized_roi_positive_ratio() {
        // Profit equal to 3x the deposit over 2 years: sqrt(3) - 1 = 73.2%
        let roi = annualized_roi_pct(dec!(300), dec!(100), 2).unwrap();
        assert!((roi - dec!(73.205)).abs() < dec!(0.01), "got {roi}");
    }

    #[test]
    fn test_annualized_roi_negative_ratio_is_simple() {
        // -50% over 5 years => -10% per year
        let roi = annualized_roi_pct(dec!(-50), dec!(100), 5).unwrap();
        assert_eq!(roi, dec!(-10));
    }

    #[test]
    fn test_annualized_roi_no_down_payment() {
        assert_eq!(annualized_roi_pct(dec!(5000), Decimal::ZERO, 5).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_annualized_roi_zero_profit() {
        assert_eq!(annualized_roi_pct(Decimal::ZERO, dec!(100), 5).unwrap(), dec!(-100));
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(categorize_roi(dec!(15)), Rating::Excellent);
        assert_eq!(categorize_roi(dec!(12)), Rating::VeryGood);
        assert_eq!(categorize_roi(dec!(11.99)), Rating::Good);
        assert_eq!(categorize_roi(dec!(8)), Rating::Good);
        assert_eq!(categorize_roi(dec!(5)), Rating::Fair);
        assert_eq!(categorize_roi(dec!(4.99)), Rating::Poor);
        assert_eq!(categorize_roi(dec!(-20)), Rating::Poor);
    }

    #[test]
    fn test_strategies_include_medium_and_long() {
        let result = result_for(&sample_params());
        let names: Vec<&str> = result.strategies.iter().map(|s| s.strategy.as_str()).collect();
        assert!(names.contains(&"Medium-term Investment"));
        assert!(names.contains(&"Long-term Wealth Building"));
    }

    #[test]
    fn test_project_total_return_arbitrary_horizon() {
        let params = sample_params();
        let metrics = purchase_metrics(&params).unwrap();
        let p = project_total_return(&params, &metrics, 12).unwrap();
        assert_eq!(p.years, 12);
        let growth = project(params.property_price, params.capital_growth_rate, 12).unwrap();
        assert_eq!(p.capital_gain, growth.total_gain);
    }

    #[test]
    fn test_cash_purchase_without_deposit_warning() {
        let mut params = sample_params();
        params.down_payment_pct = Decimal::ZERO;
        let result = recommend_holding_period(&params).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("No down payment")));
        assert!(result
            .result
            .periods
            .iter()
            .all(|p| p.roi_pct.is_zero() && p.annualized_roi_pct.is_zero()));
    }
}
