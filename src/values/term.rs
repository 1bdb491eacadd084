//! Loan term in whole months

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValueError;

const MIN_MONTHS: i64 = 1;
const MAX_MONTHS: i64 = 600;

/// Number of monthly installments, 1 to 600
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct TermMonths(u32);

impl TermMonths {
    pub fn new(months: i64) -> Result<Self, ValueError> {
        if months < MIN_MONTHS {
            return Err(ValueError::new(
                "term",
                format!("term must be ≥ {} month", MIN_MONTHS),
            ));
        }
        if months > MAX_MONTHS {
            return Err(ValueError::new(
                "term",
                format!("term must not exceed {} months", MAX_MONTHS),
            ));
        }
        Ok(Self(months as u32))
    }

    pub fn months(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for TermMonths {
    type Error = ValueError;

    fn try_from(months: i64) -> Result<Self, Self::Error> {
        Self::new(months)
    }
}

impl From<TermMonths> for u32 {
    fn from(term: TermMonths) -> Self {
        term.0
    }
}

impl fmt::Display for TermMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.0)
    }
}
