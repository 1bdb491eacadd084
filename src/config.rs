//! Runtime configuration for the simulation service

use std::time::Duration;

use chrono::{Local, NaiveDate};

/// Environment variable holding the catalog cache time-to-live in seconds
pub const CATALOG_TTL_ENV: &str = "CREDIT_SIM_CATALOG_TTL_SECS";

/// Environment variable capping the listing page size
pub const MAX_PAGE_SIZE_ENV: &str = "CREDIT_SIM_MAX_PAGE_SIZE";

/// Default catalog time-to-live (5 minutes)
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(300);

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Configuration for a simulation service
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// How long a fetched catalog snapshot is served before refetching
    pub catalog_ttl: Duration,

    /// Date stamped on new simulations; `None` uses the local current date
    pub reference_date: Option<NaiveDate>,

    /// Largest page size accepted by the listing operation
    pub max_page_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            catalog_ttl: DEFAULT_CATALOG_TTL,
            reference_date: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by `CREDIT_SIM_*` environment variables
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(secs) = lookup(CATALOG_TTL_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.catalog_ttl = Duration::from_secs(secs);
        }

        if let Some(size) = lookup(MAX_PAGE_SIZE_ENV)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
        {
            config.max_page_size = size;
        }

        config
    }

    /// Set a fixed reference date
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Date to stamp on a simulation created now
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_lookup(lookup(&[]));
        assert_eq!(config.catalog_ttl, Duration::from_secs(300));
        assert_eq!(config.max_page_size, 100);
        assert!(config.reference_date.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = SimulationConfig::from_lookup(lookup(&[
            (CATALOG_TTL_ENV, "30"),
            (MAX_PAGE_SIZE_ENV, " 25 "),
        ]));
        assert_eq!(config.catalog_ttl, Duration::from_secs(30));
        assert_eq!(config.max_page_size, 25);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SimulationConfig::from_lookup(lookup(&[
            (CATALOG_TTL_ENV, "five minutes"),
            (MAX_PAGE_SIZE_ENV, "0"),
        ]));
        assert_eq!(config.catalog_ttl, DEFAULT_CATALOG_TTL);
        assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    fn test_fixed_reference_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        let config = SimulationConfig::default().on_date(date);
        assert_eq!(config.reference_date(), date);
    }
}
