//! Catalog seed loading.

use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Product, ProductId};

/// Seed catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<CatalogEntry>,
}

/// One product as listed in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    pub stock: u32,
    /// Listed unless explicitly withdrawn; always unlisted with zero stock.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl From<CatalogEntry> for Product {
    fn from(entry: CatalogEntry) -> Self {
        Product {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            price: entry.price,
            image_url: entry.image_url,
            category: entry.category,
            stock: entry.stock,
            is_available: entry.available && entry.stock > 0,
            created_at: Utc::now(),
        }
    }
}

/// Parse a catalog from YAML text.
pub fn parse_catalog(yaml: &str) -> Result<Vec<Product>, CatalogError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;

    let mut products: Vec<Product> = Vec::with_capacity(file.products.len());
    for entry in file.products {
        if products.iter().any(|p| p.id == entry.id) {
            return Err(CatalogError::DuplicateId(entry.id));
        }
        products.push(entry.into());
    }
    Ok(products)
}

/// Load the catalog from `path`, or the embedded seed when no path is given.
pub fn load_catalog(path: Option<&str>) -> Result<Vec<Product>, CatalogError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(Path::new(path))
                .map_err(|e| CatalogError::FileRead(path.to_string(), e.to_string()))?;
            parse_catalog(&content)
        }
        None => parse_catalog(EMBEDDED_CATALOG),
    }
}
