//! Cart
//!
//! An ordered collection of line items with at most one line per product.
//! Quantities never drop below one: a line that would reach zero is removed.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{TotalPriceError, line_total, total_price},
    products::{Product, ProductId, SellerId},
};

pub mod store;

pub use store::CartStore;

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// One product-plus-quantity entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product: ProductId,
    name: String,
    price: Money<'static, Currency>,
    quantity: u32,
    image: String,
    seller: SellerId,
}

impl LineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
            seller: product.seller_id.clone(),
        }
    }

    /// Returns the product id of the line
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Returns the product name copied at add time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price copied at add time
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Returns the quantity (always at least 1)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price multiplied by the quantity
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the product does not fit.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        line_total(&self.price, self.quantity)
    }

    /// Returns the image reference
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the selling artisan
    pub fn seller(&self) -> &SellerId {
        &self.seller
    }
}

/// Shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the product has its quantity incremented by one;
    /// otherwise a new line with quantity 1 is appended. Stock is not checked
    /// here.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in a
    /// different currency from the cart.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let quantity = match self.items.iter_mut().find(|item| item.product == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.items.push(LineItem::from_product(product));
                1
            }
        };

        debug!(product = %product.id, quantity, "added to cart");

        Ok(quantity)
    }

    /// Remove the line for a product. Absent ids are ignored.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product: &ProductId) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.product != *product);

        let removed = self.items.len() != before;

        if removed {
            debug!(%product, "removed cart line");
        }

        removed
    }

    /// Set the quantity of a line.
    ///
    /// Negative values clamp to zero and zero removes the line. Absent ids
    /// are ignored. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product: &ProductId, quantity: i64) -> bool {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        if quantity == 0 {
            return self.remove_item(product);
        }

        match self.items.iter_mut().find(|item| item.product == *product) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                debug!(%product, quantity, "set cart line quantity");
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price × quantity over every line.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Sum of quantities over every line.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Get the line for a product.
    #[must_use]
    pub fn get(&self, product: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product == *product)
    }

    /// Whether the cart has a line for a product.
    #[must_use]
    pub fn contains(&self, product: &ProductId) -> bool {
        self.get(product).is_some()
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
