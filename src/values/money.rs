//! Non-negative fixed-point monetary amounts

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{format_bound, round_money, InterestRate, ValueError};

/// Inclusive construction window for a kind of amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountBounds {
    /// Name used in error messages
    pub label: &'static str,
    pub min: Decimal,
    pub max: Decimal,
}

/// Any amount handled by the engine
pub const GENERAL_AMOUNT: AmountBounds = AmountBounds {
    label: "amount",
    min: dec!(0.00),
    max: dec!(999999999999.99),
};

/// The value a customer asks to borrow
pub const LOAN_VALUE: AmountBounds = AmountBounds {
    label: "loan value",
    min: dec!(0.01),
    max: dec!(999999999.99),
};

/// A monetary amount in the account currency
///
/// Construction enforces [`AmountBounds`]; the arithmetic operators return unchecked
/// intermediates so that running balances may dip marginally below zero from rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub const ZERO: MonetaryAmount = MonetaryAmount(Decimal::ZERO);

    /// Create a general amount (0.00 to 999,999,999,999.99)
    pub fn new(value: Decimal) -> Result<Self, ValueError> {
        Self::with_bounds(value, GENERAL_AMOUNT)
    }

    /// Create a requested loan value (0.01 to 999,999,999.99)
    ///
    /// The value is kept as given, including any digits beyond cents; request
    /// validation rejects those before a loan value is built.
    pub fn loan_value(value: Decimal) -> Result<Self, ValueError> {
        Self::with_bounds(value, LOAN_VALUE)
    }

    /// Create an amount checked against a specific window
    pub fn with_bounds(value: Decimal, bounds: AmountBounds) -> Result<Self, ValueError> {
        if value < bounds.min {
            return Err(ValueError::new(
                "value",
                format!("{} must be ≥ {}", bounds.label, format_bound(bounds.min)),
            ));
        }
        if value > bounds.max {
            return Err(ValueError::new(
                "value",
                format!("{} must not exceed {}", bounds.label, format_bound(bounds.max)),
            ));
        }
        Ok(Self(value))
    }

    /// Wrap an already computed figure without checking bounds
    pub(crate) fn trusted(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Round to cents, half away from zero
    pub fn round(self) -> Self {
        Self(round_money(self.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for MonetaryAmount {
    type Error = ValueError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for MonetaryAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for MonetaryAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for MonetaryAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for MonetaryAmount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<Decimal> for MonetaryAmount {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

/// Interest accrued on an amount for one period
impl Mul<InterestRate> for MonetaryAmount {
    type Output = Self;

    fn mul(self, rhs: InterestRate) -> Self {
        Self(self.0 * rhs.value())
    }
}

impl Div<Decimal> for MonetaryAmount {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self {
        Self(self.0 / rhs)
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a MonetaryAmount> for MonetaryAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, amount| acc + *amount)
    }
}
