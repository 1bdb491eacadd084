//! Catalog sources: CSV files and in-memory product lists

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use csv::Reader;
use rust_decimal::Decimal;

use super::{default_catalog, Product};
use crate::ports::CatalogSource;
use crate::values::InterestRate;

/// Raw CSV row: `code,description,monthly_rate,min_term,max_term,min_value,max_value`
///
/// Blank `max_term` / `max_value` cells mean the window is unbounded.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    code: u32,
    description: String,
    monthly_rate: String,
    min_term: u32,
    max_term: Option<u32>,
    min_value: String,
    max_value: Option<String>,
}

impl CsvRow {
    fn to_product(self) -> anyhow::Result<Product> {
        let rate = parse_decimal("monthly_rate", &self.monthly_rate)?;
        let monthly_rate = InterestRate::new(rate)
            .map_err(|e| anyhow!("product {}: {}", self.code, e))?;

        let max_value = match self.max_value.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_decimal("max_value", text)?),
        };

        Ok(Product {
            code: self.code,
            description: self.description,
            monthly_rate,
            min_term: self.min_term,
            max_term: self.max_term,
            min_value: parse_decimal("min_value", &self.min_value)?,
            max_value,
        })
    }
}

fn parse_decimal(column: &str, text: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(text.trim()).with_context(|| format!("invalid {} '{}'", column, text))
}

/// Load all products from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Product>> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)
        .with_context(|| format!("failed to open catalog {}", path.display()))?;
    read_rows(reader)
}

/// Load products from any reader (e.g., string buffer, network stream)
pub fn load_products_from_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<Product>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> anyhow::Result<Vec<Product>> {
    let mut products = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        products.push(row.to_product()?);
    }

    Ok(products)
}

/// Catalog read from a CSV file on every fetch
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for CsvCatalog {
    async fn fetch_all_products(&self) -> anyhow::Result<Vec<Product>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_products(path))
            .await
            .context("catalog loader task failed")?
    }
}

/// Fixed in-memory catalog
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_all_products(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}
