use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RealtyError;
use crate::financing::amortization::{loan_terms, LoanTerms};
use crate::property::params::InvestmentParameters;
use crate::types::{Money, Percent, Rate};
use crate::RealtyResult;

/// Share of price assumed for annual running costs (taxes, insurance,
/// maintenance, management, vacancy) when none are supplied.
pub const ESTIMATED_EXPENSE_RATE: Rate = dec!(0.04);

/// Share of price assumed for stamp duty, legal and other closing costs.
pub const CLOSING_COST_RATE: Rate = dec!(0.03);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldMetrics {
    pub annual_rent: Money,
    /// Expenses used in the calculation (supplied or estimated)
    pub annual_expenses: Money,
    /// True when `annual_expenses` was estimated from price
    pub expenses_estimated: bool,
    /// Annual rent / price, as a percentage
    pub gross_yield_pct: Percent,
    /// (Annual rent - expenses) / price, as a percentage
    pub net_yield_pct: Percent,
    /// Taken to equal net yield in this model; no separate NOI-based cap rate.
    pub cap_rate_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowMetrics {
    pub monthly_expenses: Money,
    /// Rent - loan instalment - running costs
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub closing_costs: Money,
    /// Down payment + closing costs
    pub total_cash_invested: Money,
    /// Annual cash flow / total cash invested, as a percentage
    pub cash_on_cash_return_pct: Percent,
}

/// Financing, yield and cash-flow figures shared by every downstream analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseMetrics {
    pub loan: LoanTerms,
    pub yields: YieldMetrics,
    pub cash_flow: CashFlowMetrics,
}

/// Validate the parameters and derive loan, yield and cash-flow metrics.
pub fn purchase_metrics(params: &InvestmentParameters) -> RealtyResult<PurchaseMetrics> {
    params.validate()?;

    let loan = loan_terms(
        params.property_price,
        params.down_payment_pct,
        params.annual_interest_rate,
        params.loan_term_years,
    )?;
    let yields = compute_yields(params)?;
    let cash_flow = compute_cash_flow(params, &loan, &yields);

    Ok(PurchaseMetrics {
        loan,
        yields,
        cash_flow,
    })
}

/// Annual expenses to use for a purchase. A supplied value of exactly zero
/// is read as "not known" and replaced by [`ESTIMATED_EXPENSE_RATE`] of price.
pub fn effective_annual_expenses(params: &InvestmentParameters) -> (Money, bool) {
    if params.annual_expenses.is_zero() {
        (params.property_price * ESTIMATED_EXPENSE_RATE, true)
    } else {
        (params.annual_expenses, false)
    }
}

/// Gross yield, net yield and cap rate.
pub fn compute_yields(params: &InvestmentParameters) -> RealtyResult<YieldMetrics> {
    if params.property_price <= Decimal::ZERO {
        return Err(RealtyError::DivisionByZero {
            context: "rental yield (annual rent / property price)".into(),
        });
    }

    let annual_rent = params.monthly_rent * dec!(12);
    let (annual_expenses, expenses_estimated) = effective_annual_expenses(params);

    let gross_yield_pct = annual_rent / params.property_price * dec!(100);
    let net_yield_pct = (annual_rent - annual_expenses) / params.property_price * dec!(100);

    Ok(YieldMetrics {
        annual_rent,
        annual_expenses,
        expenses_estimated,
        gross_yield_pct,
        net_yield_pct,
        cap_rate_pct: net_yield_pct,
    })
}

/// Monthly/annual cash flow after debt service and cash-on-cash return.
pub fn compute_cash_flow(
    params: &InvestmentParameters,
    loan: &LoanTerms,
    yields: &YieldMetrics,
) -> CashFlowMetrics {
    let monthly_expenses = yields.annual_expenses / dec!(12);
    let monthly_cash_flow = params.monthly_rent - loan.monthly_payment - monthly_expenses;
    let annual_cash_flow = monthly_cash_flow * dec!(12);

    let closing_costs = params.property_price * CLOSING_COST_RATE;
    let total_cash_invested = loan.down_payment + closing_costs;

    let cash_on_cash_return_pct = if total_cash_invested <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        annual_cash_flow / total_cash_invested * dec!(100)
    };

    CashFlowMetrics {
        monthly_expenses,
        monthly_cash_flow,
        annual_cash_flow,
        closing_costs,
        total_cash_invested,
        cash_on_cash_return_pct,
    }
}
