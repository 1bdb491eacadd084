//! Time-bounded catalog snapshot for eligibility lookups
//!
//! The full product list is fetched once, sorted by code, and served from memory until
//! its expiry instant passes or the cache is invalidated. A refresh swaps in a new
//! `Arc` snapshot, so readers never see a partially replaced list.
//!
//! Refreshes go through an async gate with a re-check after acquiring it: callers that
//! miss concurrently wait for the first fetch instead of issuing their own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{find_eligible, Product};
use crate::error::SimulationError;
use crate::ports::CatalogSource;
use crate::values::{MonetaryAmount, TermMonths};

/// A fetched product list and the instant it stops being served
#[derive(Debug, Clone)]
struct CatalogSnapshot {
    products: Arc<Vec<Product>>,
    expires_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
}

impl CacheStats {
    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Product catalog cache shared by every request
pub struct ProductCache {
    source: Arc<dyn CatalogSource>,
    ttl: Duration,
    snapshot: RwLock<Option<CatalogSnapshot>>,
    refresh_gate: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
}

impl ProductCache {
    pub fn new(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Every product in ascending code order, fetching on a miss
    pub async fn get_all(&self) -> Result<Arc<Vec<Product>>, SimulationError> {
        if let Some(products) = self.current() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(products);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited on the gate
        if let Some(products) = self.current() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(products);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Product catalog cache miss, fetching");

        let mut products = self
            .source
            .fetch_all_products()
            .await
            .map_err(SimulationError::Catalog)?;
        products.sort_by_key(|p| p.code);

        let products = Arc::new(products);
        let snapshot = CatalogSnapshot {
            products: Arc::clone(&products),
            expires_at: Instant::now() + self.ttl,
        };
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        log::info!(
            "Loaded {} products into catalog cache (ttl {:?})",
            products.len(),
            self.ttl
        );

        Ok(products)
    }

    /// First product in code order whose windows contain `value` and `term`
    ///
    /// An empty catalog or no match is `Ok(None)`, never an error.
    pub async fn get_eligible(
        &self,
        value: MonetaryAmount,
        term: TermMonths,
    ) -> Result<Option<Product>, SimulationError> {
        let products = self.get_all().await?;
        let product = find_eligible(&products, value, term).cloned();

        match &product {
            Some(p) => log::debug!("Product {} eligible for {} over {}", p.code, value, term),
            None => log::debug!("No eligible product for {} over {}", value, term),
        }

        Ok(product)
    }

    /// Drop the current snapshot; the next read refetches
    pub fn invalidate(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
        log::debug!("Product catalog cache invalidated");
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
        }
    }

    fn current(&self) -> Option<Arc<Vec<Product>>> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|s| Instant::now() < s.expires_at)
            .map(|s| Arc::clone(&s.products))
    }
}

impl std::fmt::Debug for ProductCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}
