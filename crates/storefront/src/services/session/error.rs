//! Session store errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Remote login call failed (invalid credentials or transport failure).
    #[error("auth error: {0}")]
    Api(#[from] ApiError),

    /// The session cache file could not be read or written.
    #[error("session cache error: {0}")]
    Cache(#[from] CacheError),
}

impl SessionError {
    /// Whether the error is a credential rejection rather than a transport
    /// or cache failure. The view layer surfaces these differently.
    #[must_use]
    pub const fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::Api(ApiError::InvalidCredentials))
    }
}

/// Errors reading or writing the local session cache file.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
