//! Product data structures and eligibility windows

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::values::{InterestRate, MonetaryAmount, TermMonths};

/// A financial product offered by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code; products are scanned in ascending code order
    pub code: u32,

    pub description: String,

    /// Monthly interest rate applied to every simulation of this product
    pub monthly_rate: InterestRate,

    /// Shortest accepted term in months (inclusive)
    pub min_term: u32,

    /// Longest accepted term in months (inclusive), `None` = unbounded
    pub max_term: Option<u32>,

    /// Smallest accepted loan value (inclusive)
    pub min_value: Decimal,

    /// Largest accepted loan value (inclusive), `None` = unbounded
    pub max_value: Option<Decimal>,
}

impl Product {
    /// Check whether the value window contains `value`
    pub fn accepts_value(&self, value: MonetaryAmount) -> bool {
        let value = value.value();
        value >= self.min_value && self.max_value.map_or(true, |max| value <= max)
    }

    /// Check whether the term window contains `term`
    pub fn accepts_term(&self, term: TermMonths) -> bool {
        let months = term.months();
        months >= self.min_term && self.max_term.map_or(true, |max| months <= max)
    }

    /// Both windows contain the request
    pub fn accepts(&self, value: MonetaryAmount, term: TermMonths) -> bool {
        self.accepts_value(value) && self.accepts_term(term)
    }
}

/// First product whose windows contain the request
///
/// Products are scanned in the order given, so callers pass them sorted by ascending
/// code (as [`ProductCache`](super::ProductCache) snapshots are).
pub fn find_eligible(products: &[Product], value: MonetaryAmount, term: TermMonths) -> Option<&Product> {
    products.iter().find(|p| p.accepts(value, term))
}

/// Built-in catalog with contiguous value and term windows
pub fn default_catalog() -> Vec<Product> {
    let product = |code, description: &str, rate, min_term, max_term, min_value, max_value| Product {
        code,
        description: description.to_string(),
        monthly_rate: InterestRate::trusted(rate),
        min_term,
        max_term,
        min_value,
        max_value,
    };

    vec![
        product(1, "Personal Credit", dec!(0.0179), 0, Some(24), dec!(200.00), Some(dec!(10000.00))),
        product(2, "Consumer Credit", dec!(0.0175), 25, Some(48), dec!(10000.01), Some(dec!(100000.00))),
        product(3, "Vehicle Financing", dec!(0.0182), 49, Some(96), dec!(100000.01), Some(dec!(1000000.00))),
        product(4, "Real Estate Financing", dec!(0.0151), 96, None, dec!(1000000.01), None),
    ]
}
