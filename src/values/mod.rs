//! Bounded value types for loan inputs: monetary amounts, monthly rates, and terms
//!
//! Every type has a private representation and a fallible factory. Bounds are checked
//! once at construction; arithmetic between values trusts its operands and never
//! re-validates.

mod money;
mod rate;
mod term;

pub use money::{AmountBounds, MonetaryAmount, GENERAL_AMOUNT, LOAN_VALUE};
pub use rate::InterestRate;
pub use term::TermMonths;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits kept on every monetary figure
pub const MONEY_SCALE: u32 = 2;

/// A bounded value that failed construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValueError {
    /// Input field the value was meant for
    pub field: &'static str,
    /// Human readable message naming the violated bound
    pub message: String,
}

impl ValueError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Round to cents, ties away from zero (0.005 -> 0.01, -0.005 -> -0.01)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a bound with two decimals and thousands separators, e.g. `999,999,999.99`
pub(crate) fn format_bound(value: Decimal) -> String {
    let text = format!("{:.2}", value);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}
