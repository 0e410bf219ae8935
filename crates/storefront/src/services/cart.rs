//! Cart aggregator.
//!
//! Owns the current user's cart and keeps the remote copy in sync. The cart
//! follows an explicit state machine keyed to the user identity:
//!
//! ```text
//! NoUser --user change--> Loading(user) --fetch--> Loaded(cart)
//! Loaded --user change--> Loading(new user)        (forced reload)
//! any    --no user-----> NoUser                    (cart discarded)
//! ```
//!
//! Every mutation rebuilds the aggregate through [`Cart::from_lines`] and
//! applies it locally first; the full cart is then pushed to the remote API
//! as a replace. A failed push is logged and local state remains the source
//! of truth for the rest of the session. There are no retries.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, warn};

use bazaar_core::{Cart, CartLine, Product, ProductId, UserId};

use crate::api::CartApi;

/// Cart lifecycle state, keyed to the current user identity.
#[derive(Debug, Clone, PartialEq)]
pub enum CartState {
    /// No user is present; the aggregator holds no cart state.
    NoUser,
    /// A user is present and their cart fetch is outstanding (or failed;
    /// a later refresh retries).
    Loading(UserId),
    /// The user's cart, recomputed from its line items.
    Loaded(Cart),
}

impl CartState {
    /// The user this state belongs to, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::NoUser => None,
            Self::Loading(user_id) => Some(*user_id),
            Self::Loaded(cart) => Some(cart.user_id),
        }
    }
}

/// The cart aggregator service.
pub struct CartService<A> {
    api: A,
    state: Mutex<CartState>,
}

impl<A: CartApi> CartService<A> {
    /// Create an aggregator with no user and no cart.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(CartState::NoUser),
        }
    }

    /// Current cart state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.lock().clone()
    }

    /// The loaded cart, if any.
    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        match &*self.lock() {
            CartState::Loaded(cart) => Some(cart.clone()),
            CartState::NoUser | CartState::Loading(_) => None,
        }
    }

    /// React to a user-identity transition.
    ///
    /// A new user forces the state back to `Loading` and reloads their cart;
    /// transition to no user discards all cart state; an unchanged identity
    /// is a no-op.
    #[instrument(skip(self))]
    pub async fn handle_user_change(&self, user_id: Option<UserId>) {
        let Some(user_id) = user_id else {
            *self.lock() = CartState::NoUser;
            return;
        };

        {
            let mut state = self.lock();
            if state.user_id() == Some(user_id) {
                return;
            }
            *state = CartState::Loading(user_id);
        }

        self.load(user_id).await;
    }

    /// Re-fetch the current user's cart, replacing local state with the
    /// recomputed remote copy. No-op when no user is present.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        let user_id = {
            let mut state = self.lock();
            let Some(user_id) = state.user_id() else {
                return;
            };
            *state = CartState::Loading(user_id);
            user_id
        };

        self.load(user_id).await;
    }

    /// Add one unit of a product to the cart.
    ///
    /// Returns `false` when no user is present, leaving all state unchanged,
    /// so callers can redirect to login without an error path. Otherwise the
    /// line is incremented or appended, the aggregate recomputed and applied
    /// locally, and the updated cart pushed; `true` is returned regardless
    /// of whether the push later fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: &Product) -> bool {
        let updated = {
            let mut state = self.lock();
            let base = match &*state {
                CartState::NoUser => return false,
                CartState::Loading(user_id) => Cart::empty(*user_id),
                CartState::Loaded(cart) => cart.clone(),
            };

            let mut lines = base.products;
            if let Some(line) = lines.iter_mut().find(|line| line.id == product.id) {
                line.set_quantity(line.quantity + 1);
            } else {
                lines.push(CartLine::new(product, 1));
            }

            let updated = Cart::from_lines(base.id, base.user_id, lines);
            *state = CartState::Loaded(updated.clone());
            updated
        };

        self.push(&updated).await;
        true
    }

    /// Remove a product's line item. No-op if no cart is loaded or the
    /// product has no line.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_from_cart(&self, id: ProductId) {
        let updated = {
            let mut state = self.lock();
            let CartState::Loaded(cart) = &*state else {
                return;
            };
            if cart.line(id).is_none() {
                return;
            }

            let mut lines = cart.products.clone();
            lines.retain(|line| line.id != id);
            let updated = Cart::from_lines(cart.id, cart.user_id, lines);
            *state = CartState::Loaded(updated.clone());
            updated
        };

        self.push(&updated).await;
    }

    /// Set a line item's quantity, recomputing its subtotals and the cart
    /// aggregate. A quantity of zero removes the line. No-op if no cart is
    /// loaded or the product has no line.
    #[instrument(skip(self), fields(product_id = %id, quantity))]
    pub async fn update_quantity(&self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(id).await;
            return;
        }

        let updated = {
            let mut state = self.lock();
            let CartState::Loaded(cart) = &*state else {
                return;
            };

            let mut lines = cart.products.clone();
            let Some(line) = lines.iter_mut().find(|line| line.id == id) else {
                return;
            };
            line.set_quantity(quantity);

            let updated = Cart::from_lines(cart.id, cart.user_id, lines);
            *state = CartState::Loaded(updated.clone());
            updated
        };

        self.push(&updated).await;
    }

    /// Empty the cart, zeroing all aggregate fields while preserving the
    /// owner. No-op if no cart is loaded.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) {
        let updated = {
            let mut state = self.lock();
            let CartState::Loaded(cart) = &*state else {
                return;
            };

            let updated = Cart::from_lines(cart.id, cart.user_id, Vec::new());
            *state = CartState::Loaded(updated.clone());
            updated
        };

        self.push(&updated).await;
    }

    async fn load(&self, user_id: UserId) {
        let fetched = self.api.fetch_user_cart(user_id).await;

        let mut state = self.lock();
        // A later user change or mutation owns the state now; a stale fetch
        // must not overwrite it.
        if *state != CartState::Loading(user_id) {
            debug!(user_id = %user_id, "Discarding superseded cart fetch");
            return;
        }

        match fetched {
            Ok(Some(cart)) => {
                *state = CartState::Loaded(Cart::from_lines(cart.id, user_id, cart.products));
            }
            Ok(None) => {
                *state = CartState::Loaded(Cart::empty(user_id));
            }
            Err(e) => {
                // State stays Loading; an explicit refresh retries.
                warn!(error = %e, user_id = %user_id, "Failed to fetch user cart");
            }
        }
    }

    /// Push the full cart to the remote API as a replace. Fire-and-forget:
    /// a failure is logged and local state stays authoritative.
    async fn push(&self, cart: &Cart) {
        if let Err(e) = self.api.replace_cart(cart.user_id, cart).await {
            warn!(
                error = %e,
                user_id = %cart.user_id,
                "Cart push failed; local cart remains authoritative"
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
