//! Pricing

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::{Cart, LineItem};

/// Flat shipping fee in minor units (₹100 for the INR storefront).
pub const FLAT_SHIPPING_MINOR: i64 = 10_000;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// The total does not fit in the minor-unit range.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Unit price multiplied by quantity.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit.
pub fn line_total(
    price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor_units = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor_units, price.currency()))
}

/// Calculates the total price of a list of line items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: The sum does not fit in the minor-unit range.
pub fn total_price(items: &[LineItem]) -> Result<Money<'static, Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let minor_units = items.iter().try_fold(0_i64, |acc, item| {
        item.line_total()?
            .to_minor_units()
            .checked_add(acc)
            .ok_or(TotalPriceError::Overflow)
    })?;

    Ok(Money::from_minor(minor_units, first.price().currency()))
}

/// Subtotal, shipping and grand total shown in the order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Money<'static, Currency>,

    /// Shipping fee.
    pub shipping: Money<'static, Currency>,

    /// Subtotal plus shipping.
    pub total: Money<'static, Currency>,
}

impl OrderSummary {
    /// Summary with the storefront's flat shipping fee.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the totals do not fit.
    pub fn for_cart(cart: &Cart) -> Result<Self, TotalPriceError> {
        Self::with_shipping(cart, FLAT_SHIPPING_MINOR)
    }

    /// Summary with an explicit shipping fee in minor units. Empty carts are
    /// not charged shipping.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the totals do not fit.
    pub fn with_shipping(cart: &Cart, shipping_minor: i64) -> Result<Self, TotalPriceError> {
        let currency = cart.currency();
        let subtotal = cart.total()?;

        let shipping_minor = if cart.is_empty() { 0 } else { shipping_minor };

        let total_minor = subtotal
            .to_minor_units()
            .checked_add(shipping_minor)
            .ok_or(TotalPriceError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping: Money::from_minor(shipping_minor, currency),
            total: Money::from_minor(total_minor, currency),
        })
    }
}
