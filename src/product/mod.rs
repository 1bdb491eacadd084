//! Financial products, catalog sources, and the time-bounded catalog cache

mod data;
mod loader;
mod cache;

pub use data::{default_catalog, find_eligible, Product};
pub use loader::{load_products, load_products_from_reader, CsvCatalog, StaticCatalog};
pub use cache::{CacheStats, ProductCache};
