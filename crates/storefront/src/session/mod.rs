//! Account session lifecycle.
//!
//! One [`SessionManager`] owns the authenticated-user state for the whole
//! process: it mediates login, registration, and email checks against the
//! remote auth API, and persists the identity across restarts in a single
//! durable slot. There are two states - unauthenticated and authenticated -
//! and an in-flight remote call is not a state of its own.

mod store;

pub use store::{SessionStore, StoreError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

use fashionhub_core::UserId;

use crate::shop::types::{EmailAvailability, NewUser, RegistrationResult};
use crate::shop::{AuthClient, ShopError};

/// The authenticated user's identity.
///
/// Exists if and only if a successful login has occurred and has not been
/// followed by a logout. Serialized with the backend's camelCase field
/// names, which is also the format of the durable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// The user's ID.
    pub user_id: UserId,
    /// First name, for greeting headers.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Canonical (lowercased) email.
    pub email: String,
}

/// Errors surfaced to the presentation layer by session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server understood the request and said no (wrong credentials,
    /// duplicate email, ...). Carries the server's own message.
    #[error("{0}")]
    Rejected(String),

    /// The auth API could not be reached or answered out of contract.
    #[error("auth API error: {0}")]
    Api(#[from] ShopError),
}

/// Owns the current session and every transition into or out of it.
pub struct SessionManager {
    auth: AuthClient,
    store: SessionStore,
    current: Option<UserSession>,
}

impl SessionManager {
    /// Create a manager in the unauthenticated state.
    ///
    /// Call [`Self::restore_on_startup`] before reading session state.
    #[must_use]
    pub const fn new(auth: AuthClient, store: SessionStore) -> Self {
        Self {
            auth,
            store,
            current: None,
        }
    }

    /// The current session, if authenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Restore a persisted session from the durable slot.
    ///
    /// Invoked once per process lifetime, before any session read. An absent
    /// slot leaves the manager unauthenticated; a corrupt slot is deleted
    /// and likewise degrades to unauthenticated. Never fails.
    #[instrument(skip(self))]
    pub fn restore_on_startup(&mut self) {
        match self.store.load() {
            Ok(Some(session)) => {
                tracing::debug!(email = %session.email, "Restored persisted session");
                self.current = Some(session);
            }
            Ok(None) => {
                self.current = None;
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session entry");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to delete corrupt session entry");
                }
                self.current = None;
            }
        }
    }

    /// Log in with email and password.
    ///
    /// On success the session is persisted to the durable slot and becomes
    /// the current state. On any failure the prior state is kept unchanged;
    /// no retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message when the
    /// credentials are refused, or `AuthError::Api` on transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserSession, AuthError> {
        let response = self.auth.login(email, password).await?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(AuthError::Rejected(message));
        }

        // A success flag without the identity fields is out of contract
        let session = match (
            response.user_id,
            response.first_name,
            response.last_name,
            response.email,
        ) {
            (Some(user_id), Some(first_name), Some(last_name), Some(email)) => UserSession {
                user_id,
                first_name,
                last_name,
                email,
            },
            _ => {
                return Err(AuthError::Api(ShopError::UnexpectedResponse(
                    "login succeeded without user fields".to_string(),
                )));
            }
        };

        // Persistence failure degrades to an unsaved session, not a failed
        // login (last write wins on the slot either way)
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "Failed to persist session");
        }

        self.current = Some(session.clone());
        Ok(session)
    }

    /// Register a new account.
    ///
    /// Returns the server's verdict verbatim. Never alters session state:
    /// registration does not auto-authenticate.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` on transport failure.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: &NewUser) -> Result<RegistrationResult, AuthError> {
        Ok(self.auth.register(new_user).await?)
    }

    /// Check whether an email address is available to register.
    ///
    /// Pure query; no state mutation.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` on transport failure.
    pub async fn check_email_availability(
        &self,
        email: &str,
    ) -> Result<EmailAvailability, AuthError> {
        Ok(self.auth.check_email(email).await?)
    }

    /// Log out.
    ///
    /// Clears the durable slot and transitions to unauthenticated
    /// regardless of prior state. Infallible: a failed delete is logged and
    /// the in-memory state still resets.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session entry on logout");
        }
        self.current = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShopApiConfig;

    fn manager_with_slot(dir: &tempfile::TempDir) -> SessionManager {
        // The auth client never sends anything in these tests
        let config = ShopApiConfig::for_base_url("http://localhost:1/api").unwrap();
        let auth = AuthClient::new(&config).unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        SessionManager::new(auth, store)
    }

    #[test]
    fn restore_with_absent_slot_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_with_slot(&dir);

        manager.restore_on_startup();
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn restore_reads_persisted_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"userId":"u1","firstName":"A","lastName":"B","email":"a@b.com"}"#,
        )
        .unwrap();

        let mut manager = manager_with_slot(&dir);
        manager.restore_on_startup();

        let session = manager.current_user().unwrap();
        assert_eq!(session.user_id.as_str(), "u1");
        assert_eq!(session.first_name, "A");
        assert_eq!(session.last_name, "B");
        assert_eq!(session.email, "a@b.com");
    }

    #[test]
    fn restore_deletes_corrupt_entry_and_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not-json").unwrap();

        let mut manager = manager_with_slot(&dir);
        manager.restore_on_startup();

        assert!(!manager.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn logout_always_lands_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"userId":"u1","firstName":"A","lastName":"B","email":"a@b.com"}"#,
        )
        .unwrap();

        let mut manager = manager_with_slot(&dir);
        manager.restore_on_startup();
        assert!(manager.is_authenticated());

        manager.logout();
        assert!(!manager.is_authenticated());
        assert!(!path.exists());

        // Logging out while already logged out is fine too
        manager.logout();
        assert!(!manager.is_authenticated());
    }
}
