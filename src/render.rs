//! Terminal tables for catalog pages, carts and orders.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::CatalogPage,
    checkout::Order,
    dashboard::Dashboard,
    pricing::{OrderSummary, TotalPriceError},
};

/// Errors raised while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] TotalPriceError),
}

/// Write one catalog page as a table, followed by the page position.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the output cannot be written.
pub fn write_catalog_page(mut out: impl io::Write, page: &CatalogPage<'_>) -> Result<(), RenderError> {
    if page.is_empty() {
        writeln!(out, "No products found matching your criteria.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Rating", "Artisan", "Stock"]);

    for product in &page.products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            product.rating.to_string(),
            product.seller_name.clone(),
            if product.in_stock { "in stock" } else { "out of stock" }.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "page {} of {} ({} matching)",
        page.page, page.total_pages, page.total_matches
    )?;

    Ok(())
}

/// Write the cart lines and the order summary.
///
/// # Errors
///
/// - [`RenderError::Pricing`] if the totals overflow.
/// - [`RenderError::Io`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let summary = OrderSummary::for_cart(cart)?;

    write_lines(&mut out, cart.iter().map(|line| {
        (
            line.name().to_string(),
            line.quantity(),
            line.price().to_string(),
        )
    }))?;
    write_summary(&mut out, &summary)?;

    Ok(())
}

/// Write a placed order's confirmation.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), RenderError> {
    writeln!(out, "Order {} placed", order.id)?;
    writeln!(
        out,
        "Shipping to {} {}, {}, {}, {} {}",
        order.shipping.first_name,
        order.shipping.last_name,
        order.shipping.address,
        order.shipping.city,
        order.shipping.state,
        order.shipping.pin_code
    )?;
    writeln!(out, "Paid with {}", order.payment)?;

    write_lines(&mut out, order.lines.iter().map(|line| {
        (
            line.name().to_string(),
            line.quantity(),
            line.price().to_string(),
        )
    }))?;
    write_summary(&mut out, &order.summary)?;

    Ok(())
}

/// Write the dashboard figures followed by the listings and orders tables.
///
/// # Errors
///
/// - [`RenderError::Pricing`] if revenue overflows.
/// - [`RenderError::Io`] if the output cannot be written.
pub fn write_dashboard(mut out: impl io::Write, dashboard: &Dashboard) -> Result<(), RenderError> {
    let stats = dashboard.stats()?;

    writeln!(
        out,
        "Products: {}  Orders: {}  Sales: {}  Units sold: {}",
        stats.total_products, stats.total_orders, stats.total_revenue, stats.units_sold
    )?;

    let mut listings = Builder::default();
    listings.push_record(["Id", "Product", "Category", "Price", "Stock", "Sales"]);

    for listing in dashboard.listings() {
        listings.push_record([
            listing.id.to_string(),
            listing.name.clone(),
            listing.category.clone(),
            listing.price.to_string(),
            listing.stock.to_string(),
            listing.sales.to_string(),
        ]);
    }

    let mut listings = listings.build();
    listings.with(Style::modern_rounded());
    listings.modify(Rows::first(), Color::BOLD);
    listings.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{listings}")?;

    let mut orders = Builder::default();
    orders.push_record(["Order", "Date", "Customer", "Product", "Amount", "Status"]);

    for order in dashboard.orders() {
        orders.push_record([
            order.id.clone(),
            order.date.to_string(),
            order.customer.clone(),
            order.product.clone(),
            order.amount.to_string(),
            order.status.to_string(),
        ]);
    }

    let mut orders = orders.build();
    orders.with(Style::modern_rounded());
    orders.modify(Rows::first(), Color::BOLD);
    orders.modify(Columns::new(4..5), Alignment::right());

    writeln!(out, "{orders}")?;

    Ok(())
}

fn write_lines(
    out: &mut impl io::Write,
    lines: impl Iterator<Item = (String, u32, String)>,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Price"]);

    for (name, quantity, price) in lines {
        builder.push_record([name, quantity.to_string(), price]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..3), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, summary: &OrderSummary) -> Result<(), RenderError> {
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    writeln!(out, "Shipping: {}", summary.shipping)?;
    writeln!(out, "   Total: {}", summary.total)?;

    Ok(())
}
