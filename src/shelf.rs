//! Product shelf
//!
//! The add/remove button on each product card. Stock and sign-in rules are
//! enforced here rather than in the cart store.

use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{CartError, CartStore},
    products::Product,
    session::{Authenticator, IdentitySlot, SessionStore},
};

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartToggle {
    /// One unit was added.
    Added,

    /// The product's line was removed.
    Removed,
}

/// Reasons a product card cannot change the cart.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Browsing is open but the cart needs an identity.
    #[error("please sign in to add items to your cart")]
    SignInRequired,

    /// The product is not available.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// The cart refused the product.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Add `product` to the cart, or remove it if it is already there.
///
/// # Errors
///
/// - [`ShelfError::SignInRequired`] when nobody is signed in.
/// - [`ShelfError::OutOfStock`] when adding a product that is not in stock.
/// - [`ShelfError::Cart`] if the cart rejects the product.
pub fn toggle_in_cart<A, S>(
    session: &SessionStore<A, S>,
    cart: &CartStore,
    product: &Product,
) -> Result<CartToggle, ShelfError>
where
    A: Authenticator,
    S: IdentitySlot,
{
    if !session.is_authenticated() {
        return Err(ShelfError::SignInRequired);
    }

    if cart.remove_item(&product.id) {
        debug!(product = %product.id, "removed from cart via shelf");

        return Ok(CartToggle::Removed);
    }

    if !product.in_stock {
        return Err(ShelfError::OutOfStock(product.name.clone()));
    }

    cart.add_item(product)?;

    Ok(CartToggle::Added)
}
