//! Session data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity id assigned by the authentication back end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an identity is allowed to do in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses and buys.
    #[serde(alias = "user")]
    Shopper,

    /// Sells their own products and sees the dashboard.
    Artisan,

    /// Marketplace operator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shopper => "shopper",
            Self::Artisan => "artisan",
            Self::Admin => "admin",
        })
    }
}

/// The authenticated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Back-end assigned id
    pub id: IdentityId,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Storefront role
    pub role: Role,

    /// Optional avatar image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Apply a partial update, keeping every field the update leaves unset.
    #[must_use]
    pub fn merged(mut self, update: ProfileUpdate) -> Self {
        let ProfileUpdate {
            name,
            email,
            role,
            avatar,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }

        if let Some(email) = email {
            self.email = email;
        }

        if let Some(role) = role {
            self.role = role;
        }

        if let Some(avatar) = avatar {
            self.avatar = Some(avatar);
        }

        self
    }
}

/// Updatable identity fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New role
    pub role: Option<Role>,

    /// New avatar reference
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Login request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Build credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Requested role
    pub role: Role,

    /// Plain-text password
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}
