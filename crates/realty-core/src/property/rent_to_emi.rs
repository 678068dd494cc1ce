use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rating};
use crate::RealtyResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentToEmiInput {
    pub monthly_rent: Money,
    /// Monthly loan instalment
    pub monthly_payment: Money,
}

/// Recommended investor posture for a coverage category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecommendation {
    pub verdict: String,
    pub strategy: String,
    pub risk_level: String,
    pub investor_type: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageBreakdown {
    pub rent_covers_pct: Percent,
    /// Share of the instalment not covered by rent (0 when fully covered)
    pub shortfall_pct: Percent,
    pub monthly_contribution_needed: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentToEmiResult {
    /// Monthly rent / monthly instalment, as a percentage
    pub ratio_pct: Percent,
    pub category: Rating,
    pub description: String,
    /// Rent minus instalment
    pub monthly_difference: Money,
    pub annual_difference: Money,
    pub is_positive_cash_flow: bool,
    pub coverage: CoverageBreakdown,
    pub recommendation: CoverageRecommendation,
}

/// Coverage categories with their minimum ratio, highest first.
const RATIO_THRESHOLDS: [(Percent, Rating); 4] = [
    (dec!(100), Rating::Excellent),
    (dec!(80), Rating::VeryGood),
    (dec!(60), Rating::Good),
    (dec!(40), Rating::Fair),
];

pub fn classify_ratio(ratio_pct: Percent) -> Rating {
    RATIO_THRESHOLDS
        .iter()
        .find(|(min, _)| ratio_pct >= *min)
        .map(|(_, rating)| *rating)
        .unwrap_or(Rating::Poor)
}

pub fn description(category: Rating) -> &'static str {
    match category {
        Rating::Excellent => "Rent fully covers mortgage payments",
        Rating::VeryGood => "Rent covers most mortgage payments",
        Rating::Good => "Reasonable rental coverage",
        Rating::Fair => "Moderate rental coverage",
        Rating::Poor => "Low rental coverage",
    }
}

pub fn recommendation(category: Rating) -> CoverageRecommendation {
    match category {
        Rating::Excellent => CoverageRecommendation {
            verdict: "EXCELLENT CASH FLOW".into(),
            strategy: "Perfect for income-focused investors".into(),
            risk_level: "Low".into(),
            investor_type: "All investor types".into(),
            action: "Strong buy consideration - positive cash flow from day 1".into(),
        },
        Rating::VeryGood => CoverageRecommendation {
            verdict: "STRONG INVESTMENT".into(),
            strategy: "Good for balanced growth and income".into(),
            risk_level: "Low-Medium".into(),
            investor_type: "Most investors".into(),
            action: "Good buy - minimal monthly contributions required".into(),
        },
        Rating::Good => CoverageRecommendation {
            verdict: "MODERATE INVESTMENT".into(),
            strategy: "Better for growth-focused investors".into(),
            risk_level: "Medium".into(),
            investor_type: "Experienced investors".into(),
            action: "Consider if you can afford monthly contributions".into(),
        },
        Rating::Fair => CoverageRecommendation {
            verdict: "HIGH CONTRIBUTION REQUIRED".into(),
            strategy: "Only for capital growth strategies".into(),
            risk_level: "Medium-High".into(),
            investor_type: "High-income investors only".into(),
            action: "Carefully assess ongoing funding capacity".into(),
        },
        Rating::Poor => CoverageRecommendation {
            verdict: "POOR CASH FLOW".into(),
            strategy: "Avoid unless exceptional growth expected".into(),
            risk_level: "High".into(),
            investor_type: "Wealthy investors only".into(),
            action: "Consider alternative properties with better ratios".into(),
        },
    }
}

/// Rent-to-EMI ratio and coverage classification. A non-positive
/// instalment gives a ratio of 0.
///
/// A cash purchase therefore rates Poor on coverage while
/// `is_positive_cash_flow` is true: the ratio only measures loan coverage.
pub fn compute_rent_to_emi(monthly_rent: Money, monthly_payment: Money) -> RentToEmiResult {
    let ratio_pct = if monthly_payment <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        monthly_rent / monthly_payment * dec!(100)
    };

    let category = classify_ratio(ratio_pct);
    let monthly_difference = monthly_rent - monthly_payment;

    RentToEmiResult {
        ratio_pct,
        category,
        description: description(category).to_string(),
        monthly_difference,
        annual_difference: monthly_difference * dec!(12),
        is_positive_cash_flow: monthly_difference >= Decimal::ZERO,
        coverage: CoverageBreakdown {
            rent_covers_pct: ratio_pct,
            shortfall_pct: (dec!(100) - ratio_pct).max(Decimal::ZERO),
            monthly_contribution_needed: (-monthly_difference).max(Decimal::ZERO),
        },
        recommendation: recommendation(category),
    }
}

/// Rent-to-EMI analysis wrapped in the computation envelope.
pub fn analyze_rent_to_emi(
    input: &RentToEmiInput,
) -> RealtyResult<ComputationOutput<RentToEmiResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_rent < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Monthly rent cannot be negative".into(),
        });
    }
    if input.monthly_payment < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }
    if input.monthly_payment.is_zero() {
        warnings.push("No loan instalment; ratio reported as 0".into());
    }

    let result = compute_rent_to_emi(input.monthly_rent, input.monthly_payment);
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rent-to-EMI Coverage Ratio",
        input,
        warnings,
        elapsed,
        result,
    ))
}
