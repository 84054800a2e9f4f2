//! Cart store behaviour against the demo catalog.
//!
//! Sample prices: shawl ₹2,499, basket ₹899, scarf ₹1,299, jewelry ₹3,999.

use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use loomcart::{
    cart::CartStore,
    catalog::Catalog,
    pricing::OrderSummary,
    products::ProductId,
};

#[test]
fn repeated_adds_collapse_into_one_line() -> TestResult {
    let catalog = Catalog::demo()?;
    let basket = catalog.get(&ProductId::from("2")).ok_or("basket")?;
    let store = CartStore::new(INR);

    for expected in 1..=5 {
        assert_eq!(store.add_item(basket)?, expected);
    }

    let cart = store.snapshot();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&basket.id).map(|line| line.quantity()), Some(5));

    Ok(())
}

#[test]
fn totals_track_every_mutation() -> TestResult {
    let catalog = Catalog::demo()?;
    let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;
    let basket = catalog.get(&ProductId::from("2")).ok_or("basket")?;
    let scarf = catalog.get(&ProductId::from("3")).ok_or("scarf")?;
    let store = CartStore::new(INR);

    store.add_item(shawl)?;
    store.add_item(basket)?;
    store.add_item(basket)?;

    assert_eq!(store.total()?, Money::from_minor(429_700, INR));
    assert_eq!(store.count(), 3);

    store.add_item(scarf)?;
    assert_eq!(store.total()?, Money::from_minor(559_600, INR));

    store.set_quantity(&scarf.id, 3);
    assert_eq!(store.total()?, Money::from_minor(819_400, INR));
    assert_eq!(store.count(), 6);

    store.remove_item(&shawl.id);
    assert_eq!(store.total()?, Money::from_minor(569_500, INR));

    let summary = OrderSummary::for_cart(&store.snapshot())?;
    assert_eq!(summary.shipping, Money::from_minor(10_000, INR));
    assert_eq!(summary.total, Money::from_minor(579_500, INR));

    Ok(())
}

#[test]
fn zero_quantity_is_removal() -> TestResult {
    let catalog = Catalog::demo()?;
    let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;
    let basket = catalog.get(&ProductId::from("2")).ok_or("basket")?;

    let zeroed = CartStore::new(INR);
    let removed = CartStore::new(INR);

    for store in [&zeroed, &removed] {
        store.add_item(shawl)?;
        store.add_item(basket)?;
    }

    assert!(zeroed.set_quantity(&basket.id, 0));
    assert!(removed.remove_item(&basket.id));

    assert_eq!(zeroed.snapshot(), removed.snapshot());

    Ok(())
}

#[test]
fn unknown_ids_leave_cart_identical() -> TestResult {
    let catalog = Catalog::demo()?;
    let store = CartStore::new(INR);
    store.add_item(catalog.get(&ProductId::from("3")).ok_or("scarf")?)?;

    let before = store.snapshot();
    let missing = ProductId::from("999");

    assert!(!store.remove_item(&missing));
    assert!(!store.set_quantity(&missing, 4));
    assert!(!store.set_quantity(&missing, 0));

    assert_eq!(store.snapshot(), before);

    Ok(())
}

#[test]
fn empty_cart_has_no_shipping() -> TestResult {
    let store = CartStore::new(INR);

    let summary = OrderSummary::for_cart(&store.snapshot())?;

    assert_eq!(summary.total, Money::from_minor(0, INR));
    assert_eq!(store.count(), 0);

    Ok(())
}
