//! Session store
//!
//! Holds the signed-in identity, mirrors it into an [`IdentitySlot`] and
//! broadcasts changes to subscribers.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::session::{
    Authenticator, Credentials, Identity, IdentitySlot, ProfileUpdate, Registration, SessionError,
};

/// Owner of the current identity.
///
/// Every operation that talks to the authenticator takes a generation number
/// when it starts. Its result is applied only if no later operation (or
/// logout) has started since; otherwise it fails with
/// [`SessionError::Superseded`].
///
/// The slot is always written before the in-memory identity changes, so a
/// fresh [`SessionStore::restore`] reconstructs whatever the last successful
/// operation produced.
#[derive(Debug)]
pub struct SessionStore<A, S> {
    authenticator: A,
    slot: S,
    identity: watch::Sender<Option<Identity>>,
    generation: AtomicU64,
}

impl<A, S> SessionStore<A, S>
where
    A: Authenticator,
    S: IdentitySlot,
{
    /// Build a store from whatever the slot holds.
    ///
    /// The slot is read once. A snapshot that cannot be decoded is logged,
    /// cleared, and treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persistence`] if the slot cannot be read, or if
    /// a corrupt snapshot cannot be cleared.
    pub fn restore(authenticator: A, slot: S) -> Result<Self, SessionError> {
        let identity = match slot.load()? {
            None => None,
            Some(snapshot) => match serde_json::from_str::<Identity>(&snapshot) {
                Ok(identity) => {
                    info!(identity = %identity.id, role = %identity.role, "restored session");
                    Some(identity)
                }
                Err(error) => {
                    warn!(%error, "discarding unreadable identity snapshot");
                    slot.clear()?;
                    None
                }
            },
        };

        Ok(Self {
            authenticator,
            slot,
            identity: watch::Sender::new(identity),
            generation: AtomicU64::new(0),
        })
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Subscribe to identity changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// The backing authenticator.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AuthenticationFailed`] if the back end rejects the credentials.
    /// - [`SessionError::Superseded`] if a later operation started first.
    /// - [`SessionError::Persistence`] if the slot cannot be written.
    pub async fn login(&self, credentials: Credentials) -> Result<Identity, SessionError> {
        let generation = self.begin();

        let identity = self
            .authenticator
            .login(credentials)
            .await
            .map_err(SessionError::AuthenticationFailed)?;

        let identity = self.commit(generation, identity)?;

        info!(identity = %identity.id, role = %identity.role, "signed in");

        Ok(identity)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// - [`SessionError::RegistrationFailed`] if the back end rejects the registration.
    /// - [`SessionError::Superseded`] if a later operation started first.
    /// - [`SessionError::Persistence`] if the slot cannot be written.
    pub async fn register(&self, registration: Registration) -> Result<Identity, SessionError> {
        let generation = self.begin();

        let identity = self
            .authenticator
            .register(registration)
            .await
            .map_err(SessionError::RegistrationFailed)?;

        let identity = self.commit(generation, identity)?;

        info!(identity = %identity.id, role = %identity.role, "registered");

        Ok(identity)
    }

    /// Merge `update` into the current identity and save it.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveIdentity`] when signed out.
    /// - [`SessionError::ProfileUpdateFailed`] if the back end rejects the change.
    /// - [`SessionError::Superseded`] if a later operation started first.
    /// - [`SessionError::Persistence`] if the slot cannot be written.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Identity, SessionError> {
        let current = self.identity().ok_or(SessionError::NoActiveIdentity)?;
        let generation = self.begin();

        let identity = self
            .authenticator
            .update_profile(current.merged(update))
            .await
            .map_err(SessionError::ProfileUpdateFailed)?;

        let identity = self.commit(generation, identity)?;

        info!(identity = %identity.id, "profile updated");

        Ok(identity)
    }

    /// Sign out. Idempotent.
    ///
    /// The in-memory identity is cleared and any in-flight operation is
    /// superseded even when the slot cannot be cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persistence`] if the slot cannot be cleared.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut cleared = Ok(());

        let signed_out = self.identity.send_if_modified(|current| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            cleared = self.slot.clear();

            current.take().is_some()
        });

        if signed_out {
            info!("signed out");
        }

        cleared.map_err(SessionError::from)
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn commit(&self, generation: u64, identity: Identity) -> Result<Identity, SessionError> {
        let snapshot = serde_json::to_string(&identity)?;
        let mut outcome = Err(SessionError::Superseded);

        self.identity.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            match self.slot.store(&snapshot) {
                Ok(()) => {
                    *current = Some(identity.clone());
                    outcome = Ok(identity);
                    true
                }
                Err(error) => {
                    outcome = Err(error.into());
                    false
                }
            }
        });

        if matches!(outcome, Err(SessionError::Superseded)) {
            warn!(generation, "discarding superseded session result");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::{io, time::Duration};

    use async_trait::async_trait;
    use testresult::TestResult;

    use super::*;
    use crate::session::{
        AuthError, IdentityId, MemoryIdentitySlot, MockAuthenticator, MockIdentitySlot, Role,
        SlotError,
    };

    fn identity(id: &str, name: &str) -> Identity {
        Identity {
            id: IdentityId::new(id),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            role: Role::Shopper,
            avatar: None,
        }
    }

    fn signed_out(authenticator: MockAuthenticator) -> SessionStore<MockAuthenticator, MemoryIdentitySlot> {
        SessionStore {
            authenticator,
            slot: MemoryIdentitySlot::new(),
            identity: watch::Sender::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Resolves logins after a delay chosen by the email's local part.
    struct DelayedAuthenticator;

    #[async_trait]
    impl Authenticator for DelayedAuthenticator {
        async fn login(&self, credentials: Credentials) -> Result<Identity, AuthError> {
            let delay = if credentials.email.starts_with("slow") { 200 } else { 50 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            let id = credentials.email.split('@').next().unwrap_or_default();

            Ok(identity(id, id))
        }

        async fn register(&self, _registration: Registration) -> Result<Identity, AuthError> {
            Err(AuthError::Unavailable("not scripted".to_string()))
        }

        async fn update_profile(&self, identity: Identity) -> Result<Identity, AuthError> {
            Ok(identity)
        }
    }

    #[tokio::test]
    async fn login_replaces_identity_and_persists() -> TestResult {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_login()
            .once()
            .withf(|credentials| credentials.email == "mala@example.com")
            .return_once(|_| Ok(identity("mala", "Mala")));

        let store = signed_out(authenticator);
        let mut receiver = store.subscribe();

        store
            .login(Credentials::new("mala@example.com", "secret"))
            .await?;

        assert!(store.is_authenticated());
        assert!(receiver.has_changed()?);
        assert_eq!(
            receiver.borrow_and_update().as_ref().map(|i| i.name.clone()),
            Some("Mala".to_string())
        );

        let snapshot = store.slot.snapshot().ok_or("slot is empty")?;
        assert_eq!(serde_json::from_str::<Identity>(&snapshot)?, identity("mala", "Mala"));

        Ok(())
    }

    #[tokio::test]
    async fn failed_login_keeps_prior_identity() -> TestResult {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_login()
            .once()
            .return_once(|_| Err(AuthError::InvalidCredentials));

        let store = signed_out(authenticator);
        store.identity.send_replace(Some(identity("1", "John Doe")));

        let result = store.login(Credentials::new("x@example.com", "nope")).await;

        assert!(matches!(
            result,
            Err(SessionError::AuthenticationFailed(AuthError::InvalidCredentials))
        ));
        assert_eq!(store.identity(), Some(identity("1", "John Doe")));

        Ok(())
    }

    #[tokio::test]
    async fn failed_registration_is_reported() {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_register()
            .once()
            .return_once(|registration| Err(AuthError::EmailTaken(registration.email)));

        let store = signed_out(authenticator);

        let result = store
            .register(Registration {
                name: "Mala".to_string(),
                email: "mala@example.com".to_string(),
                role: Role::Shopper,
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::RegistrationFailed(_))));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn update_requires_identity() {
        let store = signed_out(MockAuthenticator::new());

        let result = store.update_profile(ProfileUpdate::default()).await;

        assert!(matches!(result, Err(SessionError::NoActiveIdentity)));
    }

    #[tokio::test]
    async fn update_merges_and_persists() -> TestResult {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_update_profile()
            .once()
            .withf(|identity| identity.name == "Mala Devi" && identity.email == "mala@example.com")
            .return_once(Ok);

        let store = signed_out(authenticator);
        store.identity.send_replace(Some(identity("mala", "Mala")));

        store
            .update_profile(ProfileUpdate {
                name: Some("Mala Devi".to_string()),
                ..ProfileUpdate::default()
            })
            .await?;

        let restored: Identity =
            serde_json::from_str(&store.slot.snapshot().ok_or("slot is empty")?)?;

        assert_eq!(restored.name, "Mala Devi");
        assert_eq!(store.identity(), Some(restored));

        Ok(())
    }

    #[tokio::test]
    async fn slot_failure_leaves_memory_intact() -> TestResult {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_login()
            .once()
            .return_once(|_| Ok(identity("mala", "Mala")));

        let mut slot = MockIdentitySlot::new();
        slot.expect_load().once().return_once(|| Ok(None));
        slot.expect_store()
            .once()
            .return_once(|_| Err(SlotError::Io(io::Error::other("disk full"))));

        let store = SessionStore::restore(authenticator, slot)?;
        let receiver = store.subscribe();

        let result = store.login(Credentials::new("mala@example.com", "secret")).await;

        assert!(matches!(result, Err(SessionError::Persistence(_))));
        assert!(!store.is_authenticated());
        assert!(!receiver.has_changed()?);

        Ok(())
    }

    #[tokio::test]
    async fn logout_is_idempotent() -> TestResult {
        let store = signed_out(MockAuthenticator::new());
        store.slot.store("{}")?;
        store.identity.send_replace(Some(identity("1", "John Doe")));

        store.logout()?;
        store.logout()?;

        assert!(!store.is_authenticated());
        assert_eq!(store.slot.snapshot(), None);

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_snapshot_restores_signed_out() -> TestResult {
        let store = SessionStore::restore(
            MockAuthenticator::new(),
            MemoryIdentitySlot::with_snapshot("{not json"),
        )?;

        assert!(!store.is_authenticated());
        assert_eq!(store.slot.snapshot(), None);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stale_login_is_superseded() -> TestResult {
        let store = SessionStore::restore(DelayedAuthenticator, MemoryIdentitySlot::new())?;

        let (slow, fast) = tokio::join!(
            store.login(Credentials::new("slow@example.com", "secret")),
            store.login(Credentials::new("fast@example.com", "secret")),
        );

        assert!(matches!(slow, Err(SessionError::Superseded)));
        assert_eq!(fast?.id, IdentityId::new("fast"));
        assert_eq!(store.identity().map(|i| i.id), Some(IdentityId::new("fast")));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn logout_supersedes_login_in_flight() -> TestResult {
        let store = SessionStore::restore(DelayedAuthenticator, MemoryIdentitySlot::new())?;

        let (login, logout) = tokio::join!(
            store.login(Credentials::new("slow@example.com", "secret")),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                store.logout()
            },
        );

        logout?;

        assert!(matches!(login, Err(SessionError::Superseded)));
        assert!(!store.is_authenticated());
        assert_eq!(store.slot.snapshot(), None);

        Ok(())
    }
}
