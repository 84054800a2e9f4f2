//! Loomcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartStore, LineItem},
    catalog::{Catalog, CatalogPage, CatalogQuery, CategoryFilter, SortOrder},
    checkout::{Checkout, CheckoutError, CheckoutStep, Order, PaymentMethod, ShippingDetails},
    dashboard::{Dashboard, DashboardError, DashboardStats, ListingError, ListingForm},
    fixtures::FixtureError,
    pricing::{OrderSummary, TotalPriceError},
    products::{Product, ProductId, Rating, SellerId},
    session::{
        Authenticator, Credentials, DemoAuthenticator, FileIdentitySlot, Identity, IdentitySlot,
        MemoryIdentitySlot, ProfileUpdate, Registration, Role, SessionError, SessionStore,
    },
    shelf::{CartToggle, ShelfError, toggle_in_cart},
};
