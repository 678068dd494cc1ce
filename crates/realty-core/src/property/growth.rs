use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyError;
use crate::time_value::future_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    pub property_price: Money,
    /// Annual capital growth (0.055 = 5.5%); negative for depreciation
    pub growth_rate: Rate,
    pub years: u32,
    /// Extra growth rates to compare at the final year
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenario_rates: Vec<Rate>,
}

/// One year of the value schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    pub property_value: Money,
    /// Value minus purchase price
    pub cumulative_gain: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub growth_rate: Rate,
    /// Years 1..=N in order
    pub schedule: Vec<GrowthPoint>,
    pub final_value: Money,
    pub total_gain: Money,
}

/// Value of the property at the horizon under one growth rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppreciationScenario {
    pub growth_rate: Rate,
    pub future_value: Money,
    pub total_appreciation: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthOutput {
    pub projection: GrowthProjection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<AppreciationScenario>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Capital growth schedule plus optional appreciation scenarios.
pub fn project_growth(input: &GrowthInput) -> RealtyResult<ComputationOutput<GrowthOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.property_price <= Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }

    let projection = project(input.property_price, input.growth_rate, input.years)?;
    let scenarios = appreciation_scenarios(input.property_price, &input.scenario_rates, input.years)?;

    if input.growth_rate > dec!(0.10) {
        warnings.push(format!(
            "Growth rate {:.1}% exceeds 10%, well above long-run residential averages",
            input.growth_rate * dec!(100)
        ));
    }
    if input.growth_rate < Decimal::ZERO {
        warnings.push("Negative growth rate: projection shows depreciation".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Compound Capital Growth Projection",
        input,
        warnings,
        elapsed,
        GrowthOutput {
            projection,
            scenarios,
        },
    ))
}

/// Compound `price` forward: value(year) = price * (1 + rate)^year for
/// years 1..=`years`.
pub fn project(price: Money, rate: Rate, years: u32) -> RealtyResult<GrowthProjection> {
    if years == 0 {
        return Err(RealtyError::InvalidInput {
            field: "years".into(),
            reason: "Projection must cover at least 1 year".into(),
        });
    }

    let mut schedule = Vec::new();
    for year in 1..=years {
        let property_value = future_value(price, rate, year)?;
        schedule.push(GrowthPoint {
            year,
            property_value,
            cumulative_gain: property_value - price,
        });
    }

    let (final_value, total_gain) = schedule
        .last()
        .map(|p| (p.property_value, p.cumulative_gain))
        .unwrap_or((price, Decimal::ZERO));

    Ok(GrowthProjection {
        growth_rate: rate,
        schedule,
        final_value,
        total_gain,
    })
}

/// Horizon value under each of several growth rates.
pub fn appreciation_scenarios(
    price: Money,
    rates: &[Rate],
    years: u32,
) -> RealtyResult<Vec<AppreciationScenario>> {
    rates
        .iter()
        .map(|&rate| {
            let value = future_value(price, rate, years)?;
            Ok(AppreciationScenario {
                growth_rate: rate,
                future_value: value,
                total_appreciation: value - price,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_values() {
        let p = project(dec!(100000), dec!(0.10), 3).unwrap();
        let values: Vec<Money> = p.schedule.iter().map(|g| g.property_value).collect();
        assert_eq!(values, vec![dec!(110000), dec!(121000), dec!(133100)]);
        assert_eq!(p.final_value, dec!(133100));
        assert_eq!(p.total_gain, dec!(33100));
        assert_eq!(p.schedule[0].year, 1);
    }

    #[test]
    fn test_strictly_increasing_for_positive_rate() {
        let p = project(dec!(500000), dec!(0.055), 20).unwrap();
        assert!(p
            .schedule
            .windows(2)
            .all(|w| w[1].property_value > w[0].property_value));
    }

    #[test]
    fn test_strictly_decreasing_for_negative_rate() {
        let p = project(dec!(500000), dec!(-0.02), 10).unwrap();
        assert!(p
            .schedule
            .windows(2)
            .all(|w| w[1].property_value < w[0].property_value));
        assert!(p.total_gain < Decimal::ZERO);
    }

    #[test]
    fn test_constant_for_zero_rate() {
        let p = project(dec!(500000), Decimal::ZERO, 5).unwrap();
        assert!(p.schedule.iter().all(|g| g.property_value == dec!(500000)));
        assert!(p.schedule.iter().all(|g| g.cumulative_gain.is_zero()));
    }

    #[test]
    fn test_zero_years_rejected() {
        assert!(project(dec!(500000), dec!(0.05), 0).is_err());
    }

    #[test]
    fn test_appreciation_scenarios() {
        let s = appreciation_scenarios(dec!(200000), &[dec!(0.0), dec!(0.05)], 2).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].total_appreciation, Decimal::ZERO);
        assert_eq!(s[1].future_value, dec!(220500));
    }

    #[test]
    fn test_envelope_warnings() {
        let input = GrowthInput {
            property_price: dec!(400000),
            growth_rate: dec!(-0.01),
            years: 5,
            scenario_rates: vec![dec!(0.03), dec!(0.07)],
        };
        let result = project_growth(&input).unwrap();
        assert_eq!(result.result.projection.schedule.len(), 5);
        assert_eq!(result.result.scenarios.len(), 2);
        assert!(result.warnings.iter().any(|w| w.contains("depreciation")));
    }
}
