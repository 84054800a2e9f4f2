//! Cart store
//!
//! Single owner of the shopping cart. Screens read derived values from it and
//! subscribe for changes; none of them hold cart state themselves.

use rusty_money::{Money, iso::Currency};
use tokio::sync::watch;

use crate::{
    cart::{Cart, CartError},
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// Cart owner with change notification.
///
/// Every mutation is applied under the channel's write lock, so subscribers
/// only ever observe whole operations. Subscribers are notified only when the
/// cart actually changed.
#[derive(Debug)]
pub struct CartStore {
    cart: watch::Sender<Cart>,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: watch::Sender::new(Cart::new(currency)),
        }
    }

    /// Subscribe to cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.cart.subscribe()
    }

    /// A copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.cart.borrow().clone()
    }

    /// Add one unit of a product. See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in a
    /// different currency from the cart.
    pub fn add_item(&self, product: &Product) -> Result<u32, CartError> {
        let mut outcome = Ok(0);

        self.cart.send_if_modified(|cart| {
            outcome = cart.add_item(product);
            outcome.is_ok()
        });

        outcome
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove_item(&self, product: &ProductId) -> bool {
        self.cart.send_if_modified(|cart| cart.remove_item(product))
    }

    /// Set a line's quantity. See [`Cart::set_quantity`].
    pub fn set_quantity(&self, product: &ProductId, quantity: i64) -> bool {
        self.cart
            .send_if_modified(|cart| cart.set_quantity(product, quantity))
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.cart.send_if_modified(|cart| {
            let changed = !cart.is_empty();
            cart.clear();
            changed
        });
    }

    /// Empty the cart and return what it held, if `accept` approves it.
    ///
    /// `accept` sees the cart under the same lock that empties it, so nothing
    /// added in between can be lost. A refused cart is left untouched.
    pub fn take_if(&self, accept: impl FnOnce(&Cart) -> bool) -> Option<Cart> {
        let mut taken = None;

        self.cart.send_if_modified(|cart| {
            if !accept(cart) {
                return false;
            }

            let empty = Cart::new(cart.currency());
            taken = Some(std::mem::replace(cart, empty));
            true
        });

        taken
    }

    /// Current total price.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        self.cart.borrow().total()
    }

    /// Current number of units (the navigation badge count).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.borrow().count()
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, product: &ProductId) -> bool {
        self.cart.borrow().contains(product)
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.borrow().is_empty()
    }

    /// The cart currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.cart.borrow().currency()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn derived_values_are_fresh_after_each_call() -> TestResult {
        let catalog = Catalog::demo()?;
        let store = CartStore::new(INR);
        let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;
        let basket = catalog.get(&ProductId::from("2")).ok_or("basket")?;

        store.add_item(shawl)?;
        assert_eq!(store.count(), 1);

        store.add_item(basket)?;
        store.add_item(basket)?;
        assert_eq!(store.total()?, Money::from_minor(429_700, INR));
        assert_eq!(store.count(), 3);

        store.set_quantity(&basket.id, 1);
        assert_eq!(store.total()?, Money::from_minor(339_800, INR));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.count(), 0);

        Ok(())
    }

    #[test]
    fn subscribers_see_changes() -> TestResult {
        let catalog = Catalog::demo()?;
        let store = CartStore::new(INR);
        let mut receiver = store.subscribe();
        let scarf = catalog.get(&ProductId::from("3")).ok_or("scarf")?;

        assert!(!receiver.has_changed()?);

        store.add_item(scarf)?;

        assert!(receiver.has_changed()?);
        assert_eq!(receiver.borrow_and_update().count(), 1);

        Ok(())
    }

    #[test]
    fn no_op_mutations_do_not_notify() -> TestResult {
        let store = CartStore::new(INR);
        let mut receiver = store.subscribe();
        let missing = ProductId::from("404");

        assert!(!store.remove_item(&missing));
        assert!(!store.set_quantity(&missing, 3));
        store.clear();

        assert!(!receiver.has_changed()?);
        assert!(receiver.borrow_and_update().is_empty());

        Ok(())
    }

    #[test]
    fn take_if_empties_only_when_accepted() -> TestResult {
        let catalog = Catalog::demo()?;
        let store = CartStore::new(INR);
        let mut receiver = store.subscribe();
        let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;

        store.add_item(shawl)?;
        receiver.borrow_and_update();

        assert_eq!(store.take_if(|_| false), None);
        assert!(!receiver.has_changed()?);
        assert_eq!(store.count(), 1);

        let taken = store.take_if(|cart| cart.count() == 1).ok_or("cart not taken")?;

        assert!(taken.contains(&shawl.id));
        assert!(store.is_empty());
        assert_eq!(store.currency(), INR);
        assert!(receiver.has_changed()?);

        Ok(())
    }

    #[test]
    fn rejected_add_leaves_cart_untouched() -> TestResult {
        let catalog = Catalog::demo()?;
        let store = CartStore::new(USD);
        let receiver = store.subscribe();
        let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;

        assert!(store.add_item(shawl).is_err());
        assert!(!receiver.has_changed()?);
        assert!(store.snapshot().is_empty());

        Ok(())
    }
}
