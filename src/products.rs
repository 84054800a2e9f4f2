//! Products
//!
//! Read-only catalog entries as supplied by the catalog data source. The cart
//! and session stores never mutate these; they copy what they need.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Listing sequence number, when the id is numeric.
    ///
    /// Catalog ids are assigned in listing order, so a larger sequence means a
    /// more recently listed product.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque identifier of the artisan selling a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    /// Create a seller id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors constructing a [`Rating`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside `0..=5`.
    #[error("rating {0} is outside 0..=5")]
    OutOfRange(Decimal),
}

/// Average customer rating between 0 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if the value is negative or above 5.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value.is_sign_negative() || value > Self::MAX {
            return Err(RatingError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    /// The exact rating.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The rating rounded to the nearest half star.
    #[must_use]
    pub fn stars(&self) -> Decimal {
        (self.0 * Decimal::TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            / Decimal::TWO
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Image reference
    pub image: String,

    /// Selling artisan
    pub seller_id: SellerId,

    /// Selling artisan's display name
    pub seller_name: String,

    /// Average rating
    pub rating: Rating,

    /// Category name
    pub category: String,

    /// Whether the product can currently be bought
    pub in_stock: bool,
}
