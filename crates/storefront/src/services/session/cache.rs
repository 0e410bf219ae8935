//! Local session cache.
//!
//! Persists the logged-in user as JSON under a single well-known path, the
//! CLI's analog of the browser's local storage. The cache is best-effort:
//! the session store logs write failures instead of failing the login.

use std::path::PathBuf;

use bazaar_core::User;

use super::error::CacheError;

/// File-backed cache for the authenticated user.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Create a cache over the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the cached user, if any.
    ///
    /// A missing file means no cached session.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<User>, CacheError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Write the user to the cache, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn store(&self, user: &User) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string(user)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Remove the cached user. Removing an absent cache is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bazaar_core::UserId;

    fn temp_cache(name: &str) -> SessionCache {
        let path = std::env::temp_dir()
            .join(format!("bazaar-session-cache-{name}-{}", std::process::id()))
            .join("session.json");
        SessionCache::new(path)
    }

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "username": "emilys",
            "email": "emily@example.com",
            "firstName": "Emily",
            "lastName": "Johnson"
        }))
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let cache = temp_cache("round-trip");
        cache.store(&user()).unwrap();
        let restored = cache.load().unwrap().unwrap();
        assert_eq!(restored.id, UserId::new(4));
        cache.clear().unwrap();
    }

    #[test]
    fn test_load_missing_is_none() {
        let cache = temp_cache("missing");
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let cache = temp_cache("clear-twice");
        cache.store(&user()).unwrap();
        cache.clear().unwrap();
        cache.clear().unwrap();
        assert!(cache.load().unwrap().is_none());
    }
}
