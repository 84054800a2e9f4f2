//! Loomcart
//!
//! Loomcart is the core of a handcrafted-goods storefront: a product catalog with a
//! filter, sort and paginate pipeline, a shopping cart, a persisted sign-in session
//! and a two-step checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod render;
pub mod session;
pub mod shelf;
