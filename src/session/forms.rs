//! Sign-in and sign-up forms.
//!
//! The forms hold raw input as typed and turn it into the requests the
//! [`SessionStore`](crate::session::SessionStore) accepts.

use thiserror::Error;

use crate::session::{Credentials, Registration, Role};

/// Form validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The password confirmation does not match.
    #[error("passwords do not match")]
    PasswordMismatch,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// The login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email as typed
    pub email: String,

    /// Password as typed
    pub password: String,
}

impl LoginForm {
    /// Check both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = required(&self.email, "email")?;

        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }

        Ok(Credentials::new(email, self.password.clone()))
    }
}

/// Account type chosen on the sign-up screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AccountType {
    /// Buys products.
    #[default]
    Customer,

    /// Sells products.
    Artisan,
}

impl From<AccountType> for Role {
    fn from(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Customer => Role::Shopper,
            AccountType::Artisan => Role::Artisan,
        }
    }
}

/// The sign-up screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Contact phone; required but not checked further
    pub phone: String,

    /// Chosen password
    pub password: String,

    /// Password typed a second time
    pub confirm_password: String,

    /// Customer or artisan
    pub account_type: AccountType,
}

impl RegistrationForm {
    /// Check required fields and the password confirmation.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingField`] naming the first blank field.
    /// - [`FormError::PasswordMismatch`] if the confirmation differs.
    pub fn validate(&self) -> Result<Registration, FormError> {
        let first_name = required(&self.first_name, "first name")?;
        let last_name = required(&self.last_name, "last name")?;
        let email = required(&self.email, "email")?;
        required(&self.phone, "phone")?;

        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }

        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Registration {
            name: format!("{first_name} {last_name}"),
            email: email.to_string(),
            role: self.account_type.into(),
            password: self.password.clone(),
        })
    }
}
