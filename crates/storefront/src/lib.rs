//! Bazaar Storefront client library.
//!
//! Holds the storefront's in-memory state and keeps it synchronized with a
//! remote product/cart API over plain REST:
//!
//! - [`services::session`] - the current authenticated user, cached locally
//! - [`services::cart`] - the current user's cart and its derived totals
//! - [`services::catalog`] - product listing, search, and category queries
//!
//! The remote API is consumed through the trait seams in [`api`], so every
//! service can be driven by a stub collaborator in tests. The production
//! implementation is [`api::HttpApi`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use error::StorefrontError;
