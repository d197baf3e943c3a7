//! Checked Decimal arithmetic used by the metric calculators.
//!
//! Every helper reports a `DataError` instead of panicking, so one bad
//! figure can only make its own metric unavailable.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::error::DataError;

pub type DataResult<T> = Result<T, DataError>;

pub const HUNDRED: Decimal = dec!(100);
pub const DAYS_PER_YEAR: Decimal = dec!(365);

pub fn div(numerator: Decimal, denominator: Decimal, context: &'static str) -> DataResult<Decimal> {
    if denominator.is_zero() {
        return Err(DataError::ZeroDenominator { context });
    }
    numerator
        .checked_div(denominator)
        .ok_or(DataError::Overflow { context })
}

pub fn add(a: Decimal, b: Decimal, context: &'static str) -> DataResult<Decimal> {
    a.checked_add(b).ok_or(DataError::Overflow { context })
}

pub fn sub(a: Decimal, b: Decimal, context: &'static str) -> DataResult<Decimal> {
    a.checked_sub(b).ok_or(DataError::Overflow { context })
}

pub fn mul(a: Decimal, b: Decimal, context: &'static str) -> DataResult<Decimal> {
    a.checked_mul(b).ok_or(DataError::Overflow { context })
}

/// Sum of `terms`, failing on the first overflow.
pub fn sum(terms: &[Decimal], context: &'static str) -> DataResult<Decimal> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |acc, term| add(acc, *term, context))
}

/// `Σ weight × value`, the shape of the linear scoring models.
pub fn weighted_sum(terms: &[(Decimal, Decimal)], context: &'static str) -> DataResult<Decimal> {
    terms.iter().try_fold(Decimal::ZERO, |acc, (weight, value)| {
        add(acc, mul(*weight, *value, context)?, context)
    })
}

/// `intercept + Σ weight × value`.
pub fn linear_score(
    intercept: Decimal,
    terms: &[(Decimal, Decimal)],
    context: &'static str,
) -> DataResult<Decimal> {
    add(intercept, weighted_sum(terms, context)?, context)
}

/// `numerator / denominator` expressed in percent.
pub fn pct(numerator: Decimal, denominator: Decimal, context: &'static str) -> DataResult<Decimal> {
    mul(div(numerator, denominator, context)?, HUNDRED, context)
}

/// Percentage change from `prior` to `current`, measured against |prior|.
pub fn growth(current: Decimal, prior: Decimal, context: &'static str) -> DataResult<Decimal> {
    pct(sub(current, prior, context)?, prior.abs(), context)
}

/// Arithmetic mean of two figures.
pub fn mean2(a: Decimal, b: Decimal, context: &'static str) -> DataResult<Decimal> {
    div(add(a, b, context)?, Decimal::TWO, context)
}

pub fn sqrt(x: Decimal, context: &'static str) -> DataResult<Decimal> {
    if x.is_sign_negative() && !x.is_zero() {
        return Err(DataError::Undefined {
            context,
            reason: format!("square root of negative value {x}"),
        });
    }
    x.sqrt().ok_or(DataError::Overflow { context })
}

pub fn ln(x: Decimal, context: &'static str) -> DataResult<Decimal> {
    if x <= Decimal::ZERO {
        return Err(DataError::Undefined {
            context,
            reason: format!("logarithm of non-positive value {x}"),
        });
    }
    x.checked_ln().ok_or(DataError::Overflow { context })
}

pub fn exp(x: Decimal, context: &'static str) -> DataResult<Decimal> {
    x.checked_exp().ok_or(DataError::Overflow { context })
}

/// Logistic transform `1 / (1 + e^-x)`, saturating for large |x|.
pub fn logistic(x: Decimal, context: &'static str) -> DataResult<Decimal> {
    if x > dec!(50) {
        return Ok(Decimal::ONE);
    }
    if x < dec!(-50) {
        return Ok(Decimal::ZERO);
    }
    div(Decimal::ONE, add(Decimal::ONE, exp(-x, context)?, context)?, context)
}

pub fn powi(base: Decimal, exponent: i64, context: &'static str) -> DataResult<Decimal> {
    base.checked_powi(exponent)
        .ok_or(DataError::Overflow { context })
}

/// Standard normal cumulative distribution.
pub fn norm_cdf(x: Decimal) -> Decimal {
    // Beyond ±8 the tail is below Decimal's useful precision.
    if x > dec!(8) {
        Decimal::ONE
    } else if x < dec!(-8) {
        Decimal::ZERO
    } else {
        x.norm_cdf()
    }
}

/// Standard normal density.
pub fn norm_pdf(x: Decimal) -> Decimal {
    if x.abs() > dec!(12) {
        Decimal::ZERO
    } else {
        x.norm_pdf()
    }
}

pub fn clamp(x: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    x.max(lo).min(hi)
}

/// Pass `x` through when it is strictly positive.
pub fn positive(x: Decimal, context: &'static str) -> DataResult<Decimal> {
    if x <= Decimal::ZERO {
        return Err(DataError::Undefined {
            context,
            reason: format!("requires a positive value, got {x}"),
        });
    }
    Ok(x)
}

/// Require `rate > growth` for a perpetuity, returning the spread.
pub fn perpetuity_spread(
    rate: Decimal,
    growth: Decimal,
    context: &'static str,
) -> DataResult<Decimal> {
    let spread = sub(rate, growth, context)?;
    if spread <= Decimal::ZERO {
        return Err(DataError::Undefined {
            context,
            reason: format!("discount rate {rate} must exceed growth rate {growth}"),
        });
    }
    Ok(spread)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_reports_zero_denominator() {
        assert_eq!(
            div(dec!(1), Decimal::ZERO, "x / 0"),
            Err(DataError::ZeroDenominator { context: "x / 0" })
        );
    }

    #[test]
    fn test_pct_and_growth() {
        assert_eq!(pct(dec!(100), dec!(1000), "roe").unwrap(), dec!(10));
        assert_eq!(growth(dec!(120), dec!(100), "g").unwrap(), dec!(20));
        // Growth off a negative base is measured against its magnitude.
        assert_eq!(growth(dec!(-50), dec!(-100), "g").unwrap(), dec!(50));
    }

    #[test]
    fn test_overflow_is_reported_not_raised() {
        let big = dec!(1000000000000000);
        assert_eq!(
            mul(big, big, "price * shares"),
            Err(DataError::Overflow { context: "price * shares" })
        );
        assert!(matches!(add(Decimal::MAX, Decimal::ONE, "a + b"), Err(DataError::Overflow { .. })));
        assert!(matches!(sub(Decimal::MIN, Decimal::ONE, "a - b"), Err(DataError::Overflow { .. })));
        assert!(matches!(pct(Decimal::MAX, Decimal::ONE, "margin"), Err(DataError::Overflow { .. })));
        assert!(matches!(growth(Decimal::MAX, Decimal::MIN, "g"), Err(DataError::Overflow { .. })));
    }

    #[test]
    fn test_sums() {
        assert_eq!(sum(&[dec!(1), dec!(2), dec!(3)], "s").unwrap(), dec!(6));
        assert_eq!(
            weighted_sum(&[(dec!(2), dec!(3)), (dec!(-1), dec!(4))], "w").unwrap(),
            dec!(2)
        );
        assert_eq!(linear_score(dec!(-1), &[(dec!(0.5), dec!(4))], "z").unwrap(), dec!(1));
        assert!(sum(&[Decimal::MAX, Decimal::MAX], "s").is_err());
        assert_eq!(mean2(dec!(10), dec!(20), "m").unwrap(), dec!(15));
    }

    #[test]
    fn test_ln_of_non_positive_is_undefined() {
        assert!(matches!(ln(Decimal::ZERO, "ln"), Err(DataError::Undefined { .. })));
    }

    #[test]
    fn test_logistic_saturates() {
        assert_eq!(logistic(dec!(100), "p").unwrap(), Decimal::ONE);
        assert_eq!(logistic(dec!(-100), "p").unwrap(), Decimal::ZERO);
        let mid = logistic(Decimal::ZERO, "p").unwrap();
        assert!((mid - dec!(0.5)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        let a = norm_cdf(dec!(1.0));
        let b = norm_cdf(dec!(-1.0));
        assert!((a + b - Decimal::ONE).abs() < dec!(0.001));
        assert!((a - dec!(0.8413)).abs() < dec!(0.001));
    }

    #[test]
    fn test_perpetuity_requires_spread() {
        assert!(perpetuity_spread(dec!(0.05), dec!(0.06), "ddm").is_err());
        assert_eq!(perpetuity_spread(dec!(0.10), dec!(0.04), "ddm").unwrap(), dec!(0.06));
    }
}
