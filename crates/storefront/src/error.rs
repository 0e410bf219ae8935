//! Top-level error type for storefront consumers.
//!
//! Services convert most failures into flags or log entries at the call
//! site; this type exists for the operations whose errors propagate to the
//! view layer (login, configuration, product detail CRUD). No failure here
//! is fatal to the process.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::SessionError;

/// Application-level error for the storefront client.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration loading failed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A remote API call failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A session operation failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::Api(ApiError::NotFound("product 12".to_string()));
        assert_eq!(err.to_string(), "api error: not found: product 12");

        let err = StorefrontError::Config(ConfigError::MissingEnvVar("STOREFRONT_API_URL".into()));
        assert_eq!(
            err.to_string(),
            "config error: Missing environment variable: STOREFRONT_API_URL"
        );
    }

    #[test]
    fn test_invalid_credentials_classification() {
        let err = SessionError::Api(ApiError::InvalidCredentials);
        assert!(err.is_invalid_credentials());

        let err = SessionError::Api(ApiError::NotFound("x".into()));
        assert!(!err.is_invalid_credentials());
    }
}
