//! Remote product/cart API surface.
//!
//! Split into one trait per concern so each service depends only on the
//! calls it makes and can be driven by a stub collaborator in tests:
//!
//! - [`AuthApi`] - credential login
//! - [`CatalogApi`] - product listing, search, categories, and product CRUD
//! - [`CartApi`] - per-user cart read and full-cart replace
//!
//! [`HttpApi`] implements all three against the real REST API. Every call is
//! attempted exactly once; there is no retry policy anywhere in the client.

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use thiserror::Error;

use bazaar_core::{Cart, Product, ProductId, ProductPatch, User, UserId};

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed in transit.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request path could not be joined onto the base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Login rejected by the remote API.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Credential authentication.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a username and password for a [`User`].
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError>;
}

/// Catalog listing, search, and product CRUD.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List the whole catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Server-side text search.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError>;

    /// List one category's products.
    async fn products_in_category(&self, slug: &str) -> Result<Vec<Product>, ApiError>;

    /// List category slugs.
    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    /// Fetch a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// Partial update (PATCH) of a product.
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError>;

    /// Replace (PUT) a product with its edited fields.
    async fn replace_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError>;

    /// Delete a product, returning its final state.
    async fn delete_product(&self, id: ProductId) -> Result<Product, ApiError>;
}

/// Per-user cart read and replace.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Fetch a user's existing cart, if the remote API has one.
    ///
    /// The remote responds with a `{carts: [...]}` envelope; the first entry
    /// is the user's cart.
    async fn fetch_user_cart(&self, user_id: UserId) -> Result<Option<Cart>, ApiError>;

    /// Replace the user's cart wholesale with the given recomputed cart.
    async fn replace_cart(&self, user_id: UserId, cart: &Cart) -> Result<(), ApiError>;
}
