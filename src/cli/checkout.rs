use std::io;

use clap::Args;
use loomcart::{
    cart::CartStore,
    checkout::{Checkout, PaymentMethod, ShippingDetails},
    config::StorefrontConfig,
    products::ProductId,
    render,
    shelf::toggle_in_cart,
};

use super::open_session;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Product ids to order; repeat an id to order more than one
    #[arg(required = true)]
    products: Vec<String>,

    /// First name; defaults to the signed-in name
    #[arg(long)]
    first_name: Option<String>,

    /// Last name; defaults to the signed-in name
    #[arg(long)]
    last_name: Option<String>,

    /// Email; defaults to the signed-in email
    #[arg(long)]
    email: Option<String>,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// State
    #[arg(long)]
    state: String,

    /// Six-digit PIN code
    #[arg(long)]
    pin_code: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t = PaymentMethod::Upi)]
    payment: PaymentMethod,
}

pub(crate) fn run(config: &StorefrontConfig, args: CheckoutArgs) -> Result<(), String> {
    let catalog = config
        .catalog()
        .map_err(|error| format!("failed to load catalog: {error}"))?;
    let session = open_session(config)?;
    let identity = session
        .identity()
        .ok_or("please sign in before checking out")?;

    let cart = CartStore::new(catalog.currency());

    for id in &args.products {
        let product = catalog
            .get(&ProductId::new(id.as_str()))
            .ok_or_else(|| format!("unknown product {id}"))?;

        if cart.contains(&product.id) {
            cart.add_item(product).map_err(|error| error.to_string())?;
        } else {
            toggle_in_cart(&session, &cart, product).map_err(|error| error.to_string())?;
        }
    }

    let mut names = identity.name.splitn(2, ' ');
    let first_name = args
        .first_name
        .or_else(|| names.next().map(str::to_string))
        .unwrap_or_default();
    let last_name = args
        .last_name
        .or_else(|| names.next().map(str::to_string))
        .unwrap_or_default();

    let mut checkout = Checkout::new();

    checkout
        .submit_shipping(ShippingDetails {
            first_name,
            last_name,
            email: args.email.unwrap_or(identity.email),
            phone: args.phone,
            address: args.address,
            city: args.city,
            state: args.state,
            pin_code: args.pin_code,
        })
        .map_err(|error| format!("invalid shipping details: {error}"))?;

    checkout
        .choose_payment(args.payment)
        .map_err(|error| error.to_string())?;

    let order = checkout
        .place_order(&cart)
        .map_err(|error| format!("failed to place order: {error}"))?;

    render::write_order(io::stdout().lock(), &order)
        .map_err(|error| format!("failed to write order: {error}"))
}
