//! Catalog
//!
//! The read-only product list and the browse pipeline over it.

use std::path::Path;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::{
    fixtures::{CatalogFixture, DEMO_CATALOG_YAML, FixtureError},
    products::{Product, ProductId},
};

pub mod query;

pub use query::{CatalogPage, CatalogQuery, CategoryFilter, SortOrder};

/// Validated, single-currency product catalog in listing order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog from products in listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, an id repeats, or products are
    /// priced in different currencies.
    pub fn new(products: Vec<Product>) -> Result<Self, FixtureError> {
        let currency = products
            .first()
            .map(|product| product.price.currency())
            .ok_or(FixtureError::NoProducts)?;

        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            let product_currency = product.price.currency();

            if product_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    product_currency.iso_alpha_code.to_string(),
                ));
            }

            if index.insert(product.id.clone(), position).is_some() {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }
        }

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the products fail validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        CatalogFixture::from_yaml(yaml)?.into_catalog()
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        CatalogFixture::from_path(path)?.into_catalog()
    }

    /// The embedded four-product demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded fixture is invalid.
    pub fn demo() -> Result<Self, FixtureError> {
        Self::from_yaml(DEMO_CATALOG_YAML)
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// The currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products. Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
