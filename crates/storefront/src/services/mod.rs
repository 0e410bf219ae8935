//! Stateful storefront services.
//!
//! Each service owns one slice of session state, is constructed
//! independently with its remote-API collaborator, and exposes synchronous
//! reads over state it mutates around async remote calls. The cart
//! aggregator depends on the session store only through the current user id
//! handed to [`cart::CartService::handle_user_change`].

pub mod cart;
pub mod catalog;
pub mod session;

pub use cart::{CartService, CartState};
pub use catalog::{CatalogService, CatalogSnapshot, ProductFilter};
pub use session::{SessionCache, SessionError, SessionService};
