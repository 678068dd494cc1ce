use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Upper bound of the investment score.
pub const MAX_SCORE: Decimal = dec!(10);

// Bucket thresholds, highest first: (minimum value, points awarded).
const GROSS_YIELD_BUCKETS: [(Percent, Decimal); 3] =
    [(dec!(8), dec!(3)), (dec!(6), dec!(2)), (dec!(4), dec!(1))];
const CASH_FLOW_BUCKETS: [(Money, Decimal); 3] =
    [(dec!(500), dec!(3)), (dec!(200), dec!(2)), (dec!(0), dec!(1))];
const CASH_ON_CASH_BUCKETS: [(Percent, Decimal); 3] =
    [(dec!(10), dec!(3)), (dec!(6), dec!(2)), (dec!(3), dec!(1))];
const NET_YIELD_BUCKETS: [(Percent, Decimal); 2] = [(dec!(3), dec!(1)), (dec!(1), dec!(0.5))];

/// Metrics the score is computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub gross_yield_pct: Percent,
    pub net_yield_pct: Percent,
    pub cash_on_cash_return_pct: Percent,
    pub monthly_cash_flow: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-3
    pub gross_yield: Decimal,
    /// 0-3
    pub cash_flow: Decimal,
    /// 0-3
    pub cash_on_cash: Decimal,
    /// 0-1
    pub net_yield: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentScore {
    /// Weighted bucket score in [0, 10]
    pub score: Decimal,
    pub breakdown: ScoreBreakdown,
    /// One sentence per headline metric
    pub commentary: Vec<String>,
}

/// Map yield, cash flow and return figures to a 0-10 score.
pub fn score_investment(inputs: &ScoreInputs) -> InvestmentScore {
    let breakdown = ScoreBreakdown {
        gross_yield: bucket(inputs.gross_yield_pct, &GROSS_YIELD_BUCKETS),
        cash_flow: bucket(inputs.monthly_cash_flow, &CASH_FLOW_BUCKETS),
        cash_on_cash: bucket(inputs.cash_on_cash_return_pct, &CASH_ON_CASH_BUCKETS),
        net_yield: bucket(inputs.net_yield_pct, &NET_YIELD_BUCKETS),
    };

    let raw = breakdown.gross_yield + breakdown.cash_flow + breakdown.cash_on_cash + breakdown.net_yield;
    let score = raw.max(Decimal::ZERO).min(MAX_SCORE);

    InvestmentScore {
        score,
        breakdown,
        commentary: commentary(inputs),
    }
}

fn bucket(value: Decimal, buckets: &[(Decimal, Decimal)]) -> Decimal {
    buckets
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(Decimal::ZERO)
}

fn commentary(inputs: &ScoreInputs) -> Vec<String> {
    let yield_text = if inputs.gross_yield_pct >= dec!(10) {
        "Excellent gross yield indicates strong rental income potential."
    } else if inputs.gross_yield_pct >= dec!(7) {
        "Good gross yield provides solid rental returns."
    } else {
        "Low gross yield may indicate an overpriced property or weak rental market."
    };

    let cash_flow_text = if inputs.monthly_cash_flow >= dec!(500) {
        "Strong positive cash flow provides excellent monthly income."
    } else if inputs.monthly_cash_flow >= dec!(100) {
        "Positive cash flow provides modest monthly income."
    } else if inputs.monthly_cash_flow >= Decimal::ZERO {
        "Break-even cash flow - property pays for itself."
    } else {
        "Negative cash flow requires monthly contributions."
    };

    let return_text = if inputs.cash_on_cash_return_pct >= dec!(12) {
        "Outstanding cash-on-cash return beats most investments."
    } else if inputs.cash_on_cash_return_pct >= dec!(8) {
        "Strong cash-on-cash return provides good investment returns."
    } else if inputs.cash_on_cash_return_pct >= dec!(4) {
        "Moderate cash-on-cash return is acceptable for a stable investment."
    } else {
        "Low cash-on-cash return suggests poor investment performance."
    };

    vec![
        yield_text.to_string(),
        cash_flow_text.to_string(),
        return_text.to_string(),
    ]
}
