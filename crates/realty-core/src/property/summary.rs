use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::property::growth::GrowthProjection;
use crate::property::holding_period::HoldingPeriodProjection;
use crate::types::{Money, Percent, Rate, Rating};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalAnalysis {
    pub category: Rating,
    /// 1 (Poor) to 5 (Excellent)
    pub yield_rating: u8,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowStatus {
    #[serde(rename = "Strongly Positive")]
    StronglyPositive,
    Positive,
    #[serde(rename = "Slightly Negative")]
    SlightlyNegative,
    Negative,
}

impl CashFlowStatus {
    pub fn is_positive(&self) -> bool {
        matches!(self, CashFlowStatus::StronglyPositive | CashFlowStatus::Positive)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowAnalysis {
    pub status: CashFlowStatus,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthCategory {
    Excellent,
    Good,
    Moderate,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalAnalysis {
    pub category: GrowthCategory,
    pub description: String,
    pub total_gain: Money,
    /// Annualized return on the down payment over the projection
    pub annualized_return_pct: Percent,
    pub projection_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallRecommendation {
    pub rental_only_verdict: String,
    pub rental_only_reason: String,
    pub combined_verdict: String,
    pub combined_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSummary {
    pub rental_analysis: RentalAnalysis,
    pub cash_flow_analysis: CashFlowAnalysis,
    pub capital_analysis: CapitalAnalysis,
    pub overall_recommendation: OverallRecommendation,
}

/// Qualitative read of rental yield, cash flow and growth, with an overall verdict.
pub fn summarize(
    net_yield_pct: Percent,
    monthly_cash_flow: Money,
    capital_growth_rate: Rate,
    growth: &GrowthProjection,
    total_return: &HoldingPeriodProjection,
) -> InvestmentSummary {
    let rental_analysis = rental_analysis(net_yield_pct);
    let cash_flow_analysis = cash_flow_analysis(monthly_cash_flow);
    let capital_analysis = CapitalAnalysis {
        category: growth_category(capital_growth_rate),
        description: growth_description(capital_growth_rate),
        total_gain: growth.total_gain,
        annualized_return_pct: total_return.annualized_roi_pct,
        projection_years: total_return.years,
    };
    let overall_recommendation =
        overall(&rental_analysis, &cash_flow_analysis, &capital_analysis);

    InvestmentSummary {
        rental_analysis,
        cash_flow_analysis,
        capital_analysis,
        overall_recommendation,
    }
}

fn rental_analysis(net_yield_pct: Percent) -> RentalAnalysis {
    let (category, yield_rating, description, recommendation) = if net_yield_pct >= dec!(6) {
        (
            Rating::Excellent,
            5,
            format!("Outstanding rental yield of {net_yield_pct:.1}% - well above the typical 4-5%"),
            "Strong rental income makes this an excellent cash flow property",
        )
    } else if net_yield_pct >= dec!(5) {
        (
            Rating::VeryGood,
            4,
            format!("Strong rental yield of {net_yield_pct:.1}% - above the typical range"),
            "Good cash flow property with solid rental returns",
        )
    } else if net_yield_pct >= dec!(4) {
        (
            Rating::Good,
            3,
            format!("Moderate rental yield of {net_yield_pct:.1}% - around the typical range"),
            "Reasonable rental returns, consider other factors",
        )
    } else if net_yield_pct >= dec!(2) {
        (
            Rating::Fair,
            2,
            format!("Below-average rental yield of {net_yield_pct:.1}%"),
            "Low rental returns - capital growth potential is crucial",
        )
    } else {
        (
            Rating::Poor,
            1,
            format!("Very low rental yield of {net_yield_pct:.1}%"),
            "Poor for rental income - only consider if strong capital growth expected",
        )
    };

    RentalAnalysis {
        category,
        yield_rating,
        description,
        recommendation: recommendation.to_string(),
    }
}

fn cash_flow_analysis(monthly_cash_flow: Money) -> CashFlowAnalysis {
    let magnitude = monthly_cash_flow.abs();
    let (status, description, impact) = if monthly_cash_flow > dec!(200) {
        (
            CashFlowStatus::StronglyPositive,
            format!("Excellent monthly cash flow of ${magnitude:.0}"),
            "Property pays for itself and generates surplus income",
        )
    } else if monthly_cash_flow > Decimal::ZERO {
        (
            CashFlowStatus::Positive,
            format!("Positive monthly cash flow of ${magnitude:.0}"),
            "Property is self-sustaining with some surplus",
        )
    } else if monthly_cash_flow > dec!(-200) {
        (
            CashFlowStatus::SlightlyNegative,
            format!("Small monthly shortfall of ${magnitude:.0}"),
            "Manageable out-of-pocket expenses",
        )
    } else {
        (
            CashFlowStatus::Negative,
            format!("Significant monthly shortfall of ${magnitude:.0}"),
            "Substantial ongoing financial commitment required",
        )
    };

    CashFlowAnalysis {
        status,
        description,
        impact: impact.to_string(),
    }
}

fn growth_category(capital_growth_rate: Rate) -> GrowthCategory {
    let pct = capital_growth_rate * dec!(100);
    if pct >= dec!(7) {
        GrowthCategory::Excellent
    } else if pct >= dec!(5) {
        GrowthCategory::Good
    } else if pct >= dec!(3) {
        GrowthCategory::Moderate
    } else {
        GrowthCategory::Low
    }
}

fn growth_description(capital_growth_rate: Rate) -> String {
    let pct = capital_growth_rate * dec!(100);
    let adjective = match growth_category(capital_growth_rate) {
        GrowthCategory::Excellent => "Strong",
        GrowthCategory::Good => "Solid",
        GrowthCategory::Moderate => "Conservative",
        GrowthCategory::Low => "Minimal",
    };
    format!("{adjective} capital growth at {pct:.1}% annually")
}

fn overall(
    rental: &RentalAnalysis,
    cash_flow: &CashFlowAnalysis,
    capital: &CapitalAnalysis,
) -> OverallRecommendation {
    let positive = cash_flow.status.is_positive();

    let (rental_only_verdict, rental_only_reason) = if rental.yield_rating >= 4 && positive {
        (
            "EXCELLENT for rental income strategy",
            "Strong yields with positive cash flow make this ideal for income-focused investors",
        )
    } else if rental.yield_rating >= 3 && positive {
        (
            "GOOD for rental income strategy",
            "Solid yields with positive cash flow provide reliable income",
        )
    } else if rental.yield_rating >= 3 {
        (
            "FAIR for rental income strategy",
            "Decent yields but negative cash flow requires ongoing funding",
        )
    } else {
        (
            "POOR for rental income strategy",
            "Low yields make this unsuitable for income-focused investing",
        )
    };

    let annualized = capital.annualized_return_pct;
    let (combined_verdict, combined_reason) = if annualized >= dec!(12) {
        (
            "EXCELLENT overall investment",
            "Strong combination of rental income and capital growth provides excellent total returns",
        )
    } else if annualized >= dec!(8) {
        (
            "VERY GOOD overall investment",
            "Good balance of income and growth makes this a solid investment choice",
        )
    } else if annualized >= dec!(6) {
        (
            "GOOD overall investment",
            "Reasonable total returns when combining rental income and capital appreciation",
        )
    } else if annualized >= dec!(4) {
        (
            "FAIR overall investment",
            "Modest total returns - consider if this meets your investment goals",
        )
    } else {
        (
            "POOR overall investment",
            "Low total returns make this unsuitable for most investment strategies",
        )
    };

    OverallRecommendation {
        rental_only_verdict: rental_only_verdict.to_string(),
        rental_only_reason: rental_only_reason.to_string(),
        combined_verdict: combined_verdict.to_string(),
        combined_reason: combined_reason.to_string(),
    }
}
