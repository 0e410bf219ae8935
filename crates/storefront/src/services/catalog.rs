//! Catalog query service.
//!
//! Holds the current product listing and category list, re-querying the
//! remote API on every filter change. Each query fully replaces the product
//! list; there is no debouncing, pagination, or response caching.
//!
//! Overlapping queries are resolved last-issued-wins: every fetch takes a
//! monotonically increasing sequence token and a response older than the
//! latest issued query is discarded, so a slow early query can never
//! overwrite the results of a later one.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, instrument, warn};

use bazaar_core::{Product, ProductId, ProductPatch};

use crate::api::{ApiError, CatalogApi};

/// Generic message surfaced when a listing query fails.
const FETCH_ERROR_MESSAGE: &str = "Failed to load products";

/// Which products to list. Search and category are mutually exclusive by
/// construction; there is no way to ask for both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    /// The whole catalog.
    #[default]
    All,
    /// Server-side text search.
    Search(String),
    /// One category's products.
    Category(String),
}

/// Point-in-time view of the catalog state.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Current product listing.
    pub products: Vec<Product>,
    /// Known category slugs.
    pub categories: Vec<String>,
    /// Whether a listing query is in flight.
    pub loading: bool,
    /// Generic message for the most recent failed query, if any.
    pub error: Option<String>,
}

#[derive(Default)]
struct CatalogState {
    products: Vec<Product>,
    categories: Vec<String>,
    loading: bool,
    error: Option<String>,
}

/// The catalog query service.
pub struct CatalogService<A> {
    api: A,
    state: Mutex<CatalogState>,
    /// Sequence number of the most recently issued listing query.
    issued: AtomicU64,
}

impl<A: CatalogApi> CatalogService<A> {
    /// Create a catalog service with an empty listing.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(CatalogState::default()),
            issued: AtomicU64::new(0),
        }
    }

    /// Current catalog state.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.lock();
        CatalogSnapshot {
            products: state.products.clone(),
            categories: state.categories.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Query the catalog, replacing the product list wholesale.
    ///
    /// Sets the loading flag for the duration; on failure the listing keeps
    /// its previous contents and the error flag carries a generic message.
    /// If a newer query was issued while this one was in flight, this
    /// response is discarded.
    #[instrument(skip(self), fields(filter = ?filter))]
    pub async fn fetch_products(&self, filter: &ProductFilter) {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = match filter {
            ProductFilter::All => self.api.list_products().await,
            ProductFilter::Search(query) => self.api.search_products(query).await,
            ProductFilter::Category(slug) => self.api.products_in_category(slug).await,
        };

        let mut state = self.lock();
        if self.issued.load(Ordering::SeqCst) != token {
            debug!(token, "Discarding superseded catalog query");
            return;
        }

        state.loading = false;
        match result {
            Ok(products) => state.products = products,
            Err(e) => {
                warn!(error = %e, "Catalog query failed");
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Fetch the category list, normalized to slugs.
    ///
    /// Tolerates both bare-string and `{slug, ...}` response shapes (the
    /// API client normalizes them).
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) {
        match self.api.list_categories().await {
            Ok(categories) => self.lock().categories = categories,
            Err(e) => {
                warn!(error = %e, "Category query failed");
                self.lock().error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    // =========================================================================
    // Product detail operations
    // =========================================================================
    //
    // The detail view reads and mutates single products directly; errors are
    // surfaced to the caller and no rollback is attempted beyond not
    // applying the change.

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.api.get_product(id).await
    }

    /// Submit a partial update for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote rejects the update or the request
    /// fails.
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        self.api.update_product(id, patch).await
    }

    /// Replace a product with its edited fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote rejects the replace or the request
    /// fails.
    pub async fn replace_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        self.api.replace_product(id, patch).await
    }

    /// Delete a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.api.delete_product(id).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
