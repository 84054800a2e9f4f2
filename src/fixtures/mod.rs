//! Fixtures
//!
//! YAML catalog data. The storefront has no catalog back end, so the product
//! list comes from a fixture file (or the embedded demo set).

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

pub mod products;

pub use products::parse_price;

/// Embedded demo catalog: the four sample products.
pub const DEMO_CATALOG_YAML: &str = include_str!("../../fixtures/catalog/demo.yml");

/// Errors loading a catalog fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The catalog file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid YAML for a product list
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Price is not `"<amount> <ISO code>"`
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid rating
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Products priced in more than one currency
    #[error("Catalog is priced in {0}, but a product is priced in {1}")]
    CurrencyMismatch(String, String),

    /// The same product id appears twice
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// The fixture lists no products
    #[error("No products in fixture; currency unknown")]
    NoProducts,
}

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in listing order
    pub products: Vec<products::ProductFixture>,
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the text is not a valid catalog document.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Convert the fixture into a validated [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns an error if any product is malformed, ids repeat, currencies
    /// differ between products, or the list is empty.
    pub fn into_catalog(self) -> Result<Catalog, FixtureError> {
        let products = self
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(products)
    }
}
