//! Artisan dashboard
//!
//! A seller's own listings and incoming orders, with headline figures.

use std::fmt;

use jiff::civil::{self, Date};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    pricing::TotalPriceError,
    products::{ProductId, SellerId},
};

/// One of the seller's products, with stock and sales counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Listing id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category name
    pub category: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Units on hand
    pub stock: u32,

    /// Units sold to date
    pub sales: u32,

    /// Free-text description
    pub description: String,
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Awaiting dispatch.
    Pending,

    /// On its way.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Called off.
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        })
    }
}

/// An order placed for one of the seller's products.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerOrder {
    /// Order reference
    pub id: String,

    /// Order date
    pub date: Date,

    /// Customer name
    pub customer: String,

    /// Product name
    pub product: String,

    /// Amount charged
    pub amount: Money<'static, Currency>,

    /// Fulfilment state
    pub status: OrderStatus,
}

/// Headline figures shown above the tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Number of listings
    pub total_products: usize,

    /// Number of orders
    pub total_orders: usize,

    /// Sum of order amounts
    pub total_revenue: Money<'static, Currency>,

    /// Sum of listing sales
    pub units_sold: u64,
}

/// Listing form failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Prices are positive amounts in major units.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    /// Stock is a whole, non-negative number.
    #[error("invalid stock: {0:?}")]
    InvalidStock(String),
}

/// Dashboard mutation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// An amount is priced in a different currency from the dashboard (amount currency, dashboard currency).
    #[error("amount is in {0}, but the dashboard is priced in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// The "add product" dialog, holding raw input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    /// Product name
    pub name: String,

    /// Category name
    pub category: String,

    /// Price in major units (e.g. "2499" or "899.50")
    pub price: String,

    /// Units on hand
    pub stock: String,

    /// Free-text description, optional
    pub description: String,
}

/// A validated listing ready to be added.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    /// Product name
    pub name: String,

    /// Category name
    pub category: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Units on hand
    pub stock: u32,

    /// Free-text description
    pub description: String,
}

impl ListingForm {
    /// Validate the form, pricing it in `currency`.
    ///
    /// # Errors
    ///
    /// - [`ListingError::MissingField`] naming the first blank required field.
    /// - [`ListingError::InvalidPrice`] if the price is not a positive amount.
    /// - [`ListingError::InvalidStock`] if the stock is not a whole number.
    pub fn validate(&self, currency: &'static Currency) -> Result<NewListing, ListingError> {
        let name = self.name.trim();
        let category = self.category.trim();
        let price = self.price.trim();
        let stock = self.stock.trim();

        for (field, value) in [
            ("name", name),
            ("category", category),
            ("price", price),
            ("stock", stock),
        ] {
            if value.is_empty() {
                return Err(ListingError::MissingField(field));
            }
        }

        let minor_units = price
            .parse::<Decimal>()
            .ok()
            .filter(Decimal::is_sign_positive)
            .filter(|amount| !amount.is_zero())
            .and_then(|amount| amount.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|amount| amount.round_dp(0).to_i64())
            .ok_or_else(|| ListingError::InvalidPrice(price.to_string()))?;

        let stock = stock
            .parse::<u32>()
            .map_err(|_err| ListingError::InvalidStock(stock.to_string()))?;

        Ok(NewListing {
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_minor(minor_units, currency),
            stock,
            description: self.description.trim().to_string(),
        })
    }
}

/// A seller's dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    seller: SellerId,
    currency: &'static Currency,
    listings: Vec<Listing>,
    orders: Vec<SellerOrder>,
}

impl Dashboard {
    /// An empty dashboard for `seller`.
    #[must_use]
    pub fn new(seller: SellerId, currency: &'static Currency) -> Self {
        Self {
            seller,
            currency,
            listings: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Dashboard seeded with sample listings and orders, priced in INR.
    #[must_use]
    pub fn demo() -> Self {
        let inr = rusty_money::iso::INR;

        Self {
            seller: SellerId::new("artisan1"),
            currency: inr,
            listings: vec![
                Listing {
                    id: ProductId::new("1"),
                    name: "Traditional Bodo Shawl".to_string(),
                    category: "Traditional Textiles".to_string(),
                    price: Money::from_minor(249_900, inr),
                    stock: 15,
                    sales: 24,
                    description: String::new(),
                },
                Listing {
                    id: ProductId::new("2"),
                    name: "Bamboo Craft Basket".to_string(),
                    category: "Bamboo Crafts".to_string(),
                    price: Money::from_minor(89_900, inr),
                    stock: 30,
                    sales: 42,
                    description: String::new(),
                },
            ],
            orders: vec![
                SellerOrder {
                    id: "ORD001".to_string(),
                    date: civil::date(2024, 3, 15),
                    customer: "John Doe".to_string(),
                    product: "Traditional Bodo Shawl".to_string(),
                    amount: Money::from_minor(249_900, inr),
                    status: OrderStatus::Pending,
                },
                SellerOrder {
                    id: "ORD002".to_string(),
                    date: civil::date(2024, 3, 14),
                    customer: "Jane Smith".to_string(),
                    product: "Bamboo Craft Basket".to_string(),
                    amount: Money::from_minor(89_900, inr),
                    status: OrderStatus::Delivered,
                },
            ],
        }
    }

    /// The seller this dashboard belongs to.
    #[must_use]
    pub fn seller(&self) -> &SellerId {
        &self.seller
    }

    /// Listings in the order they were added.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Orders in the order they were recorded.
    #[must_use]
    pub fn orders(&self) -> &[SellerOrder] {
        &self.orders
    }

    /// The currency every listing and order is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn check_currency(&self, amount: &Money<'static, Currency>) -> Result<(), DashboardError> {
        let currency = amount.currency();

        if currency == self.currency {
            Ok(())
        } else {
            Err(DashboardError::CurrencyMismatch(
                currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }

    /// Record an incoming order.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::CurrencyMismatch`] if the amount is in
    /// another currency.
    pub fn record_order(&mut self, order: SellerOrder) -> Result<(), DashboardError> {
        self.check_currency(&order.amount)?;
        self.orders.push(order);

        Ok(())
    }

    /// Headline figures.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if revenue does not fit.
    pub fn stats(&self) -> Result<DashboardStats, TotalPriceError> {
        let revenue = self
            .orders
            .iter()
            .try_fold(0_i64, |sum, order| {
                sum.checked_add(order.amount.to_minor_units())
            })
            .ok_or(TotalPriceError::Overflow)?;

        Ok(DashboardStats {
            total_products: self.listings.len(),
            total_orders: self.orders.len(),
            total_revenue: Money::from_minor(revenue, self.currency),
            units_sold: self.listings.iter().map(|l| u64::from(l.sales)).sum(),
        })
    }

    /// Add a listing under the next free id and return that id.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::CurrencyMismatch`] if the listing is priced
    /// in another currency.
    pub fn add_listing(&mut self, listing: NewListing) -> Result<ProductId, DashboardError> {
        self.check_currency(&listing.price)?;

        let next = self
            .listings
            .iter()
            .filter_map(|l| l.id.sequence())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let NewListing {
            name,
            category,
            price,
            stock,
            description,
        } = listing;

        info!(seller = %self.seller, listing = next, name = %name, "listing added");

        let id = ProductId::new(next.to_string());

        self.listings.push(Listing {
            id: id.clone(),
            name,
            category,
            price,
            stock,
            sales: 0,
            description,
        });

        Ok(id)
    }

    /// Look up a listing.
    #[must_use]
    pub fn listing(&self, id: &ProductId) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    /// Remove a listing. Returns whether one was removed.
    pub fn remove_listing(&mut self, id: &ProductId) -> bool {
        let before = self.listings.len();

        self.listings.retain(|l| &l.id != id);

        before != self.listings.len()
    }

    /// Set a listing's stock. Returns whether the listing exists.
    pub fn restock(&mut self, id: &ProductId, stock: u32) -> bool {
        match self.listings.iter_mut().find(|l| &l.id == id) {
            Some(listing) => {
                listing.stock = stock;
                true
            }
            None => false,
        }
    }
}
