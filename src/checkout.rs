//! Checkout
//!
//! Two steps: shipping details, then payment. Placing the order captures the
//! cart and empties it. No payment is actually taken.

use std::fmt;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    cart::{CartStore, LineItem},
    pricing::{OrderSummary, TotalPriceError},
};

/// Where the shopper is in the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Entering the delivery address.
    #[default]
    Shipping,

    /// Choosing how to pay.
    Payment,

    /// The order has been placed.
    Placed,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shipping => "shipping details",
            Self::Payment => "payment",
            Self::Placed => "order placed",
        })
    }
}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The action belongs to a different step.
    #[error("expected the {expected} step but checkout is at {actual}")]
    WrongStep {
        /// Step the action requires
        expected: CheckoutStep,

        /// Current step
        actual: CheckoutStep,
    },

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// A shipping field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// PIN codes are six digits.
    #[error("PIN code must be six digits, got {0:?}")]
    InvalidPinCode(String),

    /// No payment method was chosen.
    #[error("choose a payment method")]
    NoPaymentMethod,

    /// The order total could not be computed.
    #[error("failed to price order")]
    Pricing(#[from] TotalPriceError),
}

/// Delivery address and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State
    pub state: String,

    /// Six-digit postal PIN code
    pub pin_code: String,
}

impl ShippingDetails {
    /// Check every field is filled in and the PIN code is well formed.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingField`] naming the first blank field.
    /// - [`CheckoutError::InvalidPinCode`] if the PIN code is not six digits.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("PIN code", &self.pin_code),
        ];

        if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(field));
        }

        let pin_code = self.pin_code.trim();

        if pin_code.len() != 6 || !pin_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutError::InvalidPinCode(pin_code.to_string()));
        }

        Ok(())
    }
}

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,

    /// Unified Payments Interface.
    Upi,

    /// Internet banking.
    NetBanking,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Card => "Credit/Debit Card",
            Self::Upi => "UPI",
            Self::NetBanking => "Net Banking",
        })
    }
}

/// A placed order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Order id
    pub id: Uuid,

    /// Where it ships
    pub shipping: ShippingDetails,

    /// How it was paid
    pub payment: PaymentMethod,

    /// Cart lines at the time of ordering
    pub lines: Vec<LineItem>,

    /// Subtotal, shipping and total
    pub summary: OrderSummary,
}

/// Checkout flow state.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    step: CheckoutStep,
    shipping: Option<ShippingDetails>,
    payment: Option<PaymentMethod>,
}

impl Checkout {
    /// Start at the shipping step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Shipping details accepted so far.
    #[must_use]
    pub fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    /// Chosen payment method.
    #[must_use]
    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    /// Accept shipping details and move on to payment.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the shipping step, or the
    /// validation error from [`ShippingDetails::validate`].
    pub fn submit_shipping(&mut self, details: ShippingDetails) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping)?;

        details.validate()?;

        self.shipping = Some(details);
        self.step = CheckoutStep::Payment;

        Ok(())
    }

    /// Pick a payment method.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the payment step.
    pub fn choose_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;

        self.payment = Some(method);

        Ok(())
    }

    /// Go back from payment to shipping. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        if self.step != CheckoutStep::Payment {
            return false;
        }

        self.step = CheckoutStep::Shipping;

        true
    }

    /// Place the order for everything in `cart`, then empty it.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::WrongStep`] outside the payment step.
    /// - [`CheckoutError::NoPaymentMethod`] if no method was chosen.
    /// - [`CheckoutError::EmptyCart`] if the cart is empty.
    /// - [`CheckoutError::Pricing`] if the total overflows.
    pub fn place_order(&mut self, cart: &CartStore) -> Result<Order, CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;

        let payment = self.payment.ok_or(CheckoutError::NoPaymentMethod)?;
        let shipping = self
            .shipping
            .clone()
            .ok_or(CheckoutError::WrongStep {
                expected: CheckoutStep::Shipping,
                actual: self.step,
            })?;

        let mut summary = Err(CheckoutError::EmptyCart);

        let taken = cart.take_if(|current| {
            if current.is_empty() {
                return false;
            }

            summary = OrderSummary::for_cart(current).map_err(CheckoutError::from);
            summary.is_ok()
        });

        let summary = summary?;
        let lines = taken.ok_or(CheckoutError::EmptyCart)?;

        let order = Order {
            id: Uuid::now_v7(),
            shipping,
            payment,
            lines: lines.items().to_vec(),
            summary,
        };

        self.step = CheckoutStep::Placed;

        info!(
            order = %order.id,
            lines = order.lines.len(),
            total = %order.summary.total,
            "order placed"
        );

        Ok(order)
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}
