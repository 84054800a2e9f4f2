//! Session
//!
//! Who is signed in, how that survives restarts, and the forms that start
//! a session.

pub mod auth;
pub mod errors;
pub mod forms;
pub mod models;
pub mod slot;
pub mod store;

pub use auth::{Authenticator, DemoAuthenticator, MockAuthenticator};
pub use errors::{AuthError, SessionError, SlotError};
pub use forms::{AccountType, FormError, LoginForm, RegistrationForm};
pub use models::{Credentials, Identity, IdentityId, ProfileUpdate, Registration, Role};
pub use slot::{FileIdentitySlot, IdentitySlot, MemoryIdentitySlot, MockIdentitySlot};
pub use store::SessionStore;
