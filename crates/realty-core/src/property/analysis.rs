use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::financing::amortization::LoanTerms;
use crate::property::break_even::{
    compute_break_even, push_unresolved_warnings, BreakEvenInputs, BreakEvenResult,
};
use crate::property::growth::{project, GrowthProjection};
use crate::property::holding_period::{
    compute_holding_periods, project_total_return, push_roi_warnings, HoldingPeriodProjection,
    HoldingPeriodResult,
};
use crate::property::params::InvestmentParameters;
use crate::property::rent_to_emi::{compute_rent_to_emi, RentToEmiResult};
use crate::property::scoring::{score_investment, InvestmentScore, ScoreInputs};
use crate::property::summary::{summarize, InvestmentSummary};
use crate::property::yields::{purchase_metrics, CashFlowMetrics, YieldMetrics};
use crate::types::{with_metadata, ComputationOutput};
use crate::RealtyResult;

/// Complete investment analysis of one purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub loan_terms: LoanTerms,
    pub yield_metrics: YieldMetrics,
    pub cash_flow_metrics: CashFlowMetrics,
    pub break_even: BreakEvenResult,
    /// Value schedule over `projection_years`
    pub growth_projection: GrowthProjection,
    pub holding_period: HoldingPeriodResult,
    /// Profit projection over `projection_years`
    pub total_return: HoldingPeriodProjection,
    pub investment_score: InvestmentScore,
    pub rent_to_emi: RentToEmiResult,
    pub summary: InvestmentSummary,
}

/// Analyse a residential investment purchase.
///
/// Validates the parameters, then derives financing, yields and cash flow,
/// runs the break-even searches, growth projection and holding-period
/// evaluation, and finally scores and classifies the result. Invalid input
/// is rejected before anything is computed.
pub fn analyze(
    params: &InvestmentParameters,
) -> RealtyResult<ComputationOutput<InvestmentAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let metrics = purchase_metrics(params)?;
    params.push_scale_warnings(&mut warnings);
    tracing::debug!(
        monthly_payment = %metrics.loan.monthly_payment,
        gross_yield_pct = %metrics.yields.gross_yield_pct,
        monthly_cash_flow = %metrics.cash_flow.monthly_cash_flow,
        "purchase metrics derived"
    );

    if metrics.yields.expenses_estimated {
        tracing::debug!(annual_expenses = %metrics.yields.annual_expenses, "expenses estimated");
        warnings.push(format!(
            "Annual expenses not supplied; estimated at 4% of price ({:.0})",
            metrics.yields.annual_expenses
        ));
    }
    if metrics.loan.loan_to_value > dec!(0.80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80%: high leverage",
            metrics.loan.loan_to_value * dec!(100)
        ));
    }
    if metrics.yields.net_yield_pct < Decimal::ZERO {
        warnings.push("Expenses exceed rent, net yield is negative".into());
    }

    let break_even = compute_break_even(&BreakEvenInputs::from_metrics(params, &metrics))?;
    push_unresolved_warnings(&break_even, &mut warnings);

    let growth_projection = project(
        params.property_price,
        params.capital_growth_rate,
        params.projection_years,
    )?;
    let holding_period = compute_holding_periods(params, &metrics)?;
    let total_return = project_total_return(params, &metrics, params.projection_years)?;
    push_roi_warnings(&metrics, &mut warnings);

    let investment_score = score_investment(&ScoreInputs {
        gross_yield_pct: metrics.yields.gross_yield_pct,
        net_yield_pct: metrics.yields.net_yield_pct,
        cash_on_cash_return_pct: metrics.cash_flow.cash_on_cash_return_pct,
        monthly_cash_flow: metrics.cash_flow.monthly_cash_flow,
    });
    let rent_to_emi = compute_rent_to_emi(params.monthly_rent, metrics.loan.monthly_payment);
    let summary = summarize(
        metrics.yields.net_yield_pct,
        metrics.cash_flow.monthly_cash_flow,
        params.capital_growth_rate,
        &growth_projection,
        &total_return,
    );

    tracing::debug!(score = %investment_score.score, "analysis complete");

    let output = InvestmentAnalysis {
        loan_terms: metrics.loan,
        yield_metrics: metrics.yields,
        cash_flow_metrics: metrics.cash_flow,
        break_even,
        growth_projection,
        holding_period,
        total_return,
        investment_score,
        rent_to_emi,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Residential Investment Analysis (Yield, Cash Flow, Break-Even, Growth)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RealtyError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_analyze_populates_every_section() {
        let params = InvestmentParameters::new(dec!(500000), dec!(3000));
        let out = analyze(&params).unwrap();
        let r = &out.result;
        assert_eq!(r.growth_projection.schedule.len(), 10);
        assert_eq!(r.holding_period.periods.len(), 6);
        assert_eq!(r.total_return.years, 10);
        assert_eq!(r.rent_to_emi.monthly_difference, dec!(3000) - r.loan_terms.monthly_payment);
        assert!(out.warnings.iter().any(|w| w.contains("estimated at 4%")));
    }

    #[test]
    fn test_invalid_input_returns_no_result() {
        let params = InvestmentParameters::new(dec!(-100), dec!(3000));
        match analyze(&params).unwrap_err() {
            RealtyError::InvalidInput { field, .. } => assert_eq!(field, "property_price"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_total_return_matches_holding_period_at_same_horizon() {
        let params = InvestmentParameters::new(dec!(650000), dec!(2700));
        let r = analyze(&params).unwrap().result;
        let ten = r.holding_period.periods.iter().find(|p| p.years == 10).unwrap();
        assert_eq!(ten.total_profit, r.total_return.total_profit);
        assert_eq!(ten.capital_gain, r.growth_projection.total_gain);
    }

    #[test]
    fn test_assumptions_echo_parameters() {
        let params = InvestmentParameters::new(dec!(500000), dec!(3000));
        let out = analyze(&params).unwrap();
        assert_eq!(out.assumptions["loan_term_years"], 30);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
