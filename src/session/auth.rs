//! Authentication back end.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::session::{AuthError, Credentials, Identity, IdentityId, Registration, Role};

/// Account operations the session store delegates to a back end.
#[automock]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for the account's identity.
    async fn login(&self, credentials: Credentials) -> Result<Identity, AuthError>;

    /// Create an account and return its identity.
    async fn register(&self, registration: Registration) -> Result<Identity, AuthError>;

    /// Save an edited identity and return the stored record.
    async fn update_profile(&self, identity: Identity) -> Result<Identity, AuthError>;
}

struct Account {
    identity: Identity,
    password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// In-memory stand-in for the account service.
///
/// Seeded with one artisan account (`artisan@example.com` / `password`).
/// Every call waits for the configured latency first.
#[derive(Debug)]
pub struct DemoAuthenticator {
    accounts: RwLock<FxHashMap<String, Account>>,
    latency: Duration,
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

impl DemoAuthenticator {
    /// Simulated round-trip time.
    pub const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

    /// Email of the seeded artisan account.
    pub const DEMO_EMAIL: &'static str = "artisan@example.com";

    /// Password of the seeded artisan account.
    pub const DEMO_PASSWORD: &'static str = "password";

    /// A back end with the seeded account and the given latency.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        let mut accounts = FxHashMap::default();

        accounts.insert(
            Self::DEMO_EMAIL.to_string(),
            Account {
                identity: Identity {
                    id: IdentityId::new("1"),
                    name: "John Doe".to_string(),
                    email: Self::DEMO_EMAIL.to_string(),
                    role: Role::Artisan,
                    avatar: None,
                },
                password: Self::DEMO_PASSWORD.to_string(),
            },
        );

        Self {
            accounts: RwLock::new(accounts),
            latency,
        }
    }

    /// Configured latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthError::Invalid(format!("{email} is not an email address"))),
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn login(&self, credentials: Credentials) -> Result<Identity, AuthError> {
        self.round_trip().await;

        let accounts = self.accounts.read().await;

        match accounts.get(&account_key(&credentials.email)) {
            Some(account) if account.password == credentials.password => {
                Ok(account.identity.clone())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        self.round_trip().await;

        if registration.name.trim().is_empty() {
            return Err(AuthError::Invalid("name is required".to_string()));
        }

        if registration.password.is_empty() {
            return Err(AuthError::Invalid("password is required".to_string()));
        }

        validate_email(&registration.email)?;

        let key = account_key(&registration.email);
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(registration.email));
        }

        let identity = Identity {
            id: IdentityId::new(Uuid::now_v7().to_string()),
            name: registration.name,
            email: registration.email,
            role: registration.role,
            avatar: None,
        };

        accounts.insert(
            key,
            Account {
                identity: identity.clone(),
                password: registration.password,
            },
        );

        Ok(identity)
    }

    async fn update_profile(&self, identity: Identity) -> Result<Identity, AuthError> {
        self.round_trip().await;

        validate_email(&identity.email)?;

        let key = account_key(&identity.email);
        let mut accounts = self.accounts.write().await;

        if accounts
            .get(&key)
            .is_some_and(|account| account.identity.id != identity.id)
        {
            return Err(AuthError::EmailTaken(identity.email));
        }

        let previous_key = accounts
            .iter()
            .find(|(_, account)| account.identity.id == identity.id)
            .map(|(key, _)| key.clone());

        // Identities restored from a snapshot may be unknown to this process.
        let Some(previous_key) = previous_key else {
            return Ok(identity);
        };

        if let Some(mut account) = accounts.remove(&previous_key) {
            account.identity = identity.clone();
            accounts.insert(key, account);
        }

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    fn instant() -> DemoAuthenticator {
        DemoAuthenticator::new(Duration::ZERO)
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Pratima Brahma".to_string(),
            email: email.to_string(),
            role: Role::Artisan,
            password: "weaving".to_string(),
        }
    }

    #[tokio::test]
    async fn seeded_account_logs_in() -> TestResult {
        let identity = instant()
            .login(Credentials::new("artisan@example.com", "password"))
            .await?;

        assert_eq!(identity.name, "John Doe");
        assert_eq!(identity.role, Role::Artisan);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let result = instant()
            .login(Credentials::new("artisan@example.com", "hunter2"))
            .await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn registered_account_can_log_in() -> TestResult {
        let backend = instant();

        let created = backend.register(registration("pratima@example.com")).await?;
        let logged_in = backend
            .login(Credentials::new("Pratima@Example.com", "weaving"))
            .await?;

        assert_eq!(created, logged_in);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> TestResult {
        let backend = instant();

        backend.register(registration("pratima@example.com")).await?;
        let second = backend.register(registration("pratima@example.com")).await;

        assert!(matches!(second, Err(AuthError::EmailTaken(_))));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_registration_is_rejected() {
        let backend = instant();

        assert!(matches!(
            backend.register(registration("not-an-email")).await,
            Err(AuthError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn email_change_rekeys_account() -> TestResult {
        let backend = instant();

        let mut identity = backend
            .login(Credentials::new("artisan@example.com", "password"))
            .await?;
        identity.email = "john@example.com".to_string();

        backend.update_profile(identity).await?;

        assert!(
            backend
                .login(Credentials::new("john@example.com", "password"))
                .await
                .is_ok()
        );
        assert!(
            backend
                .login(Credentials::new("artisan@example.com", "password"))
                .await
                .is_err()
        );

        Ok(())
    }

    #[tokio::test]
    async fn email_change_cannot_take_another_account() -> TestResult {
        let backend = instant();

        let mut created = backend.register(registration("pratima@example.com")).await?;
        created.email = "artisan@example.com".to_string();

        assert!(matches!(
            backend.update_profile(created).await,
            Err(AuthError::EmailTaken(_))
        ));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn calls_wait_for_latency() -> TestResult {
        let backend = DemoAuthenticator::default();
        let started = tokio::time::Instant::now();

        backend
            .login(Credentials::new("artisan@example.com", "password"))
            .await?;

        assert!(started.elapsed() >= DemoAuthenticator::DEFAULT_LATENCY);

        Ok(())
    }
}
