//! Session store.
//!
//! Holds the current authenticated user for the lifetime of the process and
//! mirrors it into the local session cache so a later process can restore
//! it. The session store exclusively owns the [`User`]; dependents read it
//! through [`SessionService::current_user`].

mod cache;
mod error;

pub use cache::SessionCache;
pub use error::{CacheError, SessionError};

use std::sync::Mutex;

use tracing::{info, instrument, warn};

use bazaar_core::User;

use crate::api::AuthApi;

/// The session store: current user plus its local cache.
pub struct SessionService<A> {
    api: A,
    cache: SessionCache,
    user: Mutex<Option<User>>,
}

impl<A: AuthApi> SessionService<A> {
    /// Create a session store with no user.
    pub const fn new(api: A, cache: SessionCache) -> Self {
        Self {
            api,
            cache,
            user: Mutex::new(None),
        }
    }

    /// Log in with a username and password.
    ///
    /// On success the held user is replaced and persisted to the cache; a
    /// cache write failure is logged but does not fail the login. On failure
    /// nothing changes and the caller is expected to surface a message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` on invalid credentials or transport
    /// failure.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, SessionError> {
        let user = self.api.login(username, password).await?;

        if let Err(e) = self.cache.store(&user) {
            warn!(error = %e, "Failed to persist session cache");
        }

        info!(user_id = %user.id, "Logged in");
        self.replace_user(Some(user.clone()));
        Ok(user)
    }

    /// Clear the held user and remove the cached copy. Idempotent.
    pub fn logout(&self) {
        self.replace_user(None);
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "Failed to clear session cache");
        }
    }

    /// The current authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Rehydrate the session from the cache file.
    ///
    /// Restoration is explicit: nothing happens at construction time, the
    /// view layer decides when (and whether) to call this.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Cache` if the cache exists but is unreadable.
    pub fn restore(&self) -> Result<Option<User>, SessionError> {
        let user = self.cache.load()?;
        self.replace_user(user.clone());
        Ok(user)
    }

    fn replace_user(&self, user: Option<User>) {
        *self
            .user
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = user;
    }
}
