//! Error taxonomy for simulation requests

use rust_decimal::Decimal;
use thiserror::Error;

use crate::values::ValueError;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Every bounded-value violation found in the request
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValueError>),

    #[error("no eligible product for value {value:.2} and term {term} months")]
    NoEligibleProduct { value: Decimal, term: u32 },

    /// Catalog fetch failed on a cache miss
    #[error(transparent)]
    Catalog(anyhow::Error),

    /// Persistence collaborator failure, passed through untouched
    #[error(transparent)]
    Persistence(anyhow::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid page request: page {page}, page size {page_size}")]
    InvalidPage { page: u32, page_size: u32 },
}

impl SimulationError {
    /// Violations carried by a validation failure, empty for other kinds
    pub fn violations(&self) -> &[ValueError] {
        match self {
            SimulationError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValueError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_message_lists_every_violation() {
        let err = SimulationError::Validation(vec![
            ValueError::new("value", "loan value must be ≥ 0.01"),
            ValueError::new("term", "term must not exceed 600 months"),
        ]);

        assert_eq!(
            err.to_string(),
            "validation failed: loan value must be ≥ 0.01; term must not exceed 600 months"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_no_product_message() {
        let err = SimulationError::NoEligibleProduct { value: dec!(5), term: 12 };
        assert_eq!(err.to_string(), "no eligible product for value 5.00 and term 12 months");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_persistence_is_transparent() {
        let err = SimulationError::Persistence(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
    }
}
