use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;

use crate::error::RealtyError;
use crate::types::{Money, Rate};
use crate::RealtyResult;

/// Growth factor (1 + rate)^periods over a whole number of periods.
pub fn compound_factor(rate: Rate, periods: u32) -> RealtyResult<Decimal> {
    let base = one_plus_rate(rate)?;
    base.checked_powu(u64::from(periods))
        .ok_or_else(|| RealtyError::NumericOverflow {
            context: format!("compound factor (1 + {rate})^{periods}"),
        })
}

/// Growth factor (1 + rate)^periods where periods may be fractional,
/// e.g. 7 months of an annual rate is 7/12 of a period.
pub fn fractional_compound_factor(rate: Rate, periods: Decimal) -> RealtyResult<Decimal> {
    let base = one_plus_rate(rate)?;
    let factor = match periods.to_i64() {
        Some(whole) if periods.fract().is_zero() => base.checked_powi(whole),
        _ => base.checked_powd(periods),
    };
    factor
        .ok_or_else(|| RealtyError::NumericOverflow {
            context: format!("compound factor (1 + {rate})^{periods}"),
        })
}

/// Future value of a lump sum compounded annually.
pub fn future_value(present_value: Money, rate: Rate, years: u32) -> RealtyResult<Money> {
    scale(present_value, compound_factor(rate, years)?)
}

/// `amount * factor`, with overflow reported instead of panicking.
pub fn scale(amount: Money, factor: Decimal) -> RealtyResult<Money> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| RealtyError::NumericOverflow {
            context: format!("{amount} x {factor}"),
        })
}

fn one_plus_rate(rate: Rate) -> RealtyResult<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "rate".into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_factor_basic() {
        let f = compound_factor(dec!(0.10), 2).unwrap();
        assert_eq!(f, dec!(1.21));
    }

    #[test]
    fn test_compound_factor_zero_periods() {
        assert_eq!(compound_factor(dec!(0.055), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_fractional_factor_matches_whole_periods() {
        let whole = compound_factor(dec!(0.025), 3).unwrap();
        let frac = fractional_compound_factor(dec!(0.025), dec!(3)).unwrap();
        assert!((whole - frac).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_fractional_factor_half_year() {
        // 1.21^0.5 = 1.1
        let f = fractional_compound_factor(dec!(0.21), dec!(0.5)).unwrap();
        assert!((f - dec!(1.1)).abs() < dec!(0.000001), "got {f}");
    }

    #[test]
    fn test_rate_below_minus_100_rejected() {
        assert!(compound_factor(dec!(-1), 2).is_err());
        assert!(fractional_compound_factor(dec!(-1.5), dec!(0.5)).is_err());
    }

    #[test]
    fn test_future_value() {
        let fv = future_value(dec!(1000), dec!(0.05), 2).unwrap();
        assert_eq!(fv, dec!(1102.5));
    }

    #[test]
    fn test_scale_overflow_is_an_error() {
        match scale(Decimal::MAX, dec!(2)).unwrap_err() {
            RealtyError::NumericOverflow { .. } => {}
            other => panic!("Expected NumericOverflow, got {other:?}"),
        }
    }
}
