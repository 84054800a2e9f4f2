//! Session errors.

use thiserror::Error;

/// Failures reported by the authentication back end.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email and password do not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Another account uses this email.
    #[error("an account already exists for {0}")]
    EmailTaken(String),

    /// The submitted details were rejected.
    #[error("invalid account details: {0}")]
    Invalid(String),

    /// The back end could not be reached.
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Failures reading or writing the persisted identity slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Reading or writing the slot failed.
    #[error("identity slot io error")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by [`SessionStore`](crate::session::SessionStore) operations.
///
/// None of these are fatal: the store keeps its prior identity and remains
/// usable after any of them.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The back end rejected the login.
    #[error("login failed; please check your credentials")]
    AuthenticationFailed(#[source] AuthError),

    /// The back end rejected the registration.
    #[error("registration failed; please try again")]
    RegistrationFailed(#[source] AuthError),

    /// A profile update was attempted while signed out.
    #[error("no user is signed in")]
    NoActiveIdentity,

    /// The back end rejected the profile update.
    #[error("profile update failed")]
    ProfileUpdateFailed(#[source] AuthError),

    /// A later login, registration, update or logout started before this
    /// result arrived, so it was discarded.
    #[error("a newer session change replaced this result")]
    Superseded,

    /// The identity slot failed.
    #[error("identity snapshot could not be persisted")]
    Persistence(#[from] SlotError),

    /// The identity could not be serialized.
    #[error("identity snapshot could not be encoded")]
    Snapshot(#[from] serde_json::Error),
}
