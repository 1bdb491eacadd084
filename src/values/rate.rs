//! Monthly interest rates expressed as fractions (0.0179 = 1.79% a month)

use std::fmt;
use std::ops::{Add, Mul, Sub};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ValueError;

const MIN_RATE: Decimal = dec!(0.000001);
const MAX_RATE: Decimal = dec!(0.50);
const HUNDRED: Decimal = dec!(100);

/// Periodic (monthly) interest rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct InterestRate(Decimal);

impl InterestRate {
    /// Create a rate from a fraction in [0.000001, 0.50]
    pub fn new(value: Decimal) -> Result<Self, ValueError> {
        if value < MIN_RATE {
            return Err(ValueError::new(
                "monthly_rate",
                format!("interest rate must be ≥ {}", MIN_RATE),
            ));
        }
        if value > MAX_RATE {
            return Err(ValueError::new(
                "monthly_rate",
                format!("interest rate must not exceed {}", MAX_RATE),
            ));
        }
        Ok(Self(value))
    }

    /// Create a rate from a whole-number percentage (1.79 -> 0.0179)
    pub fn from_percentage(percent: Decimal) -> Result<Self, ValueError> {
        Self::new(percent / HUNDRED)
    }

    /// Wrap a rate known to be in range without checking
    pub(crate) fn trusted(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The rate as a percentage (0.0179 -> 1.79)
    pub fn as_percentage(&self) -> Decimal {
        self.0 * HUNDRED
    }
}

impl TryFrom<Decimal> for InterestRate {
    type Error = ValueError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterestRate> for Decimal {
    fn from(rate: InterestRate) -> Self {
        rate.0
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl Add for InterestRate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for InterestRate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for InterestRate {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds() {
        assert!(InterestRate::new(dec!(0.000001)).is_ok());
        assert!(InterestRate::new(dec!(0.50)).is_ok());

        let err = InterestRate::new(dec!(0)).unwrap_err();
        assert_eq!(err.field, "monthly_rate");
        assert!(err.message.contains("0.000001"));

        let err = InterestRate::new(dec!(0.5000001)).unwrap_err();
        assert!(err.message.contains("must not exceed 0.50"));
    }

    #[test]
    fn test_from_percentage() {
        let rate = InterestRate::from_percentage(dec!(1.79)).unwrap();
        assert_eq!(rate.value(), dec!(0.0179));
        assert_eq!(rate.as_percentage(), dec!(1.79));
        assert_eq!(rate.to_string(), "1.79%");

        // 60% a month is outside the window once divided
        assert!(InterestRate::from_percentage(dec!(60)).is_err());
    }

    #[test]
    fn test_rate_arithmetic() {
        let a = InterestRate::new(dec!(0.01)).unwrap();
        let b = InterestRate::new(dec!(0.005)).unwrap();

        assert_eq!((a + b).value(), dec!(0.015));
        assert_eq!((a - b).value(), dec!(0.005));
        assert_eq!((a * dec!(100)).value(), dec!(1.00));
    }
}
