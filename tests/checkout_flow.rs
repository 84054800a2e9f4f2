//! Sign in, fill the cart from product cards and place an order.

use std::time::Duration;

use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use loomcart::{
    cart::CartStore,
    catalog::Catalog,
    checkout::{Checkout, CheckoutStep, PaymentMethod, ShippingDetails},
    products::ProductId,
    session::{Credentials, DemoAuthenticator, MemoryIdentitySlot, SessionStore},
    shelf::{CartToggle, ShelfError, toggle_in_cart},
};

#[tokio::test]
async fn signed_in_shopper_places_order() -> TestResult {
    let catalog = Catalog::demo()?;
    let session = SessionStore::restore(
        DemoAuthenticator::new(Duration::ZERO),
        MemoryIdentitySlot::new(),
    )?;
    let cart = CartStore::new(catalog.currency());
    let shawl = catalog.get(&ProductId::from("1")).ok_or("shawl")?;
    let scarf = catalog.get(&ProductId::from("3")).ok_or("scarf")?;
    let jewelry = catalog.get(&ProductId::from("4")).ok_or("jewelry")?;

    assert!(matches!(
        toggle_in_cart(&session, &cart, shawl),
        Err(ShelfError::SignInRequired)
    ));

    session
        .login(Credentials::new(
            DemoAuthenticator::DEMO_EMAIL,
            DemoAuthenticator::DEMO_PASSWORD,
        ))
        .await?;

    assert_eq!(toggle_in_cart(&session, &cart, shawl)?, CartToggle::Added);
    assert_eq!(toggle_in_cart(&session, &cart, scarf)?, CartToggle::Added);
    assert!(matches!(
        toggle_in_cart(&session, &cart, jewelry),
        Err(ShelfError::OutOfStock(_))
    ));

    let mut checkout = Checkout::new();

    checkout.submit_shipping(ShippingDetails {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "artisan@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "4 Station Road".to_string(),
        city: "Kokrajhar".to_string(),
        state: "Assam".to_string(),
        pin_code: "783370".to_string(),
    })?;
    checkout.choose_payment(PaymentMethod::Card)?;

    let order = checkout.place_order(&cart)?;

    assert_eq!(order.summary.subtotal, Money::from_minor(379_800, INR));
    assert_eq!(order.summary.total, Money::from_minor(389_800, INR));
    assert_eq!(checkout.step(), CheckoutStep::Placed);
    assert!(cart.is_empty());
    assert_eq!(order.id.get_version_num(), 7);

    Ok(())
}
