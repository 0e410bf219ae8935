//! REST client for the remote product/cart API.
//!
//! Uses `reqwest` for HTTP and `serde_json` for bodies. Responses are read
//! as text first so a parse failure can log what the remote actually sent.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use bazaar_core::{Cart, Product, ProductId, ProductPatch, User, UserId};

use crate::config::ApiConfig;

use super::{ApiError, AuthApi, CartApi, CatalogApi};

/// Client for the remote product/cart REST API.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool across clones.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: url::Url,
}

impl HttpApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Join a relative path onto the base URL.
    fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request and parse the JSON response body.
    async fn request_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, ApiError> {
        let text = self.request_text(request, what).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&text),
                "Failed to parse remote API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request, map error statuses, and return the raw body.
    async fn request_text(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&text),
                "Remote API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                body: truncate(&text),
            });
        }

        Ok(text)
    }

    async fn fetch_listing(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<Vec<Product>, ApiError> {
        let listing: ProductListing = self.request_json(request, what).await?;
        Ok(listing.into_products())
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    #[instrument(skip(self, password), fields(username = %username))]
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let request = self
            .client
            .post(self.endpoint("auth/login")?)
            .json(&serde_json::json!({ "username": username, "password": password }));

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // The remote rejects bad credentials with a 4xx and a message body.
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(ApiError::InvalidCredentials);
        }

        if !status.is_success() {
            tracing::error!(status = %status, body = %truncate(&text), "Login request failed");
            return Err(ApiError::Status {
                status,
                body: truncate(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, body = %truncate(&text), "Failed to parse login response");
            ApiError::Parse(e)
        })
    }
}

#[async_trait]
impl CatalogApi for HttpApi {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.client.get(self.endpoint("products")?);
        self.fetch_listing(request, "products").await
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let request = self
            .client
            .get(self.endpoint("products/search")?)
            .query(&[("q", query)]);
        self.fetch_listing(request, "product search").await
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn products_in_category(&self, slug: &str) -> Result<Vec<Product>, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&format!("products/category/{slug}"))?);
        self.fetch_listing(request, &format!("category {slug}")).await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let request = self.client.get(self.endpoint("products/categories")?);
        let entries: Vec<CategoryEntry> = self.request_json(request, "categories").await?;
        Ok(entries.into_iter().map(CategoryEntry::into_slug).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let request = self.client.get(self.endpoint(&format!("products/{id}"))?);
        self.request_json(request, &format!("product {id}")).await
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        let request = self
            .client
            .patch(self.endpoint(&format!("products/{id}"))?)
            .json(patch);
        self.request_json(request, &format!("product {id}")).await
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn replace_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        let request = self
            .client
            .put(self.endpoint(&format!("products/{id}"))?)
            .json(patch);
        self.request_json(request, &format!("product {id}")).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let request = self.client.delete(self.endpoint(&format!("products/{id}"))?);
        self.request_json(request, &format!("product {id}")).await
    }
}

#[async_trait]
impl CartApi for HttpApi {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn fetch_user_cart(&self, user_id: UserId) -> Result<Option<Cart>, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&format!("carts/user/{user_id}"))?);

        // A user with no cart comes back as 404 from some deployments and as
        // an empty carts list from others; both mean "no remote cart".
        let envelope: CartsEnvelope =
            match self.request_json(request, &format!("cart for user {user_id}")).await {
                Ok(envelope) => envelope,
                Err(ApiError::NotFound(_)) => return Ok(None),
                Err(e) => return Err(e),
            };

        Ok(envelope.carts.into_iter().next())
    }

    #[instrument(skip(self, cart), fields(user_id = %user_id))]
    async fn replace_cart(&self, user_id: UserId, cart: &Cart) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.endpoint(&format!("carts/{user_id}"))?)
            .json(cart);

        // The response echoes the cart; local state is already authoritative,
        // so only the status matters.
        self.request_text(request, &format!("cart {user_id}")).await?;
        Ok(())
    }
}

// =============================================================================
// Wire shapes
// =============================================================================

/// Product listings arrive either as a `{products: [...]}` page envelope or
/// as a bare array, depending on the endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductListing {
    Page { products: Vec<Product> },
    Bare(Vec<Product>),
}

impl ProductListing {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::Page { products } | Self::Bare(products) => products,
        }
    }
}

/// Category entries arrive either as bare slug strings or as objects
/// carrying a `slug` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Slugged { slug: String },
    Bare(String),
}

impl CategoryEntry {
    fn into_slug(self) -> String {
        match self {
            Self::Slugged { slug } | Self::Bare(slug) => slug,
        }
    }
}

/// Envelope around `GET /carts/user/{id}`.
#[derive(Debug, Deserialize)]
struct CartsEnvelope {
    carts: Vec<Cart>,
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_entries_normalize_from_objects() {
        let entries: Vec<CategoryEntry> = serde_json::from_value(serde_json::json!([
            {"slug": "beauty", "name": "Beauty", "url": "https://api/products/category/beauty"},
            {"slug": "fragrances"}
        ]))
        .unwrap();

        let slugs: Vec<String> = entries.into_iter().map(CategoryEntry::into_slug).collect();
        assert_eq!(slugs, vec!["beauty", "fragrances"]);
    }

    #[test]
    fn test_category_entries_pass_through_bare_strings() {
        let entries: Vec<CategoryEntry> =
            serde_json::from_value(serde_json::json!(["beauty", "fragrances"])).unwrap();

        let slugs: Vec<String> = entries.into_iter().map(CategoryEntry::into_slug).collect();
        assert_eq!(slugs, vec!["beauty", "fragrances"]);
    }

    #[test]
    fn test_listing_accepts_page_envelope() {
        let listing: ProductListing = serde_json::from_value(serde_json::json!({
            "products": [{"id": 1, "title": "A", "price": 2.0}],
            "total": 1,
            "skip": 0,
            "limit": 30
        }))
        .unwrap();
        assert_eq!(listing.into_products().len(), 1);
    }

    #[test]
    fn test_listing_accepts_bare_array() {
        let listing: ProductListing =
            serde_json::from_value(serde_json::json!([{"id": 1, "title": "A", "price": 2.0}]))
                .unwrap();
        assert_eq!(listing.into_products().len(), 1);
    }

    #[test]
    fn test_carts_envelope_first_entry() {
        let envelope: CartsEnvelope = serde_json::from_value(serde_json::json!({
            "carts": [{
                "id": 19, "userId": 5, "products": [],
                "total": 0.0, "discountedTotal": 0.0,
                "totalProducts": 0, "totalQuantity": 0
            }],
            "total": 1
        }))
        .unwrap();
        assert_eq!(envelope.carts.len(), 1);
    }
}
