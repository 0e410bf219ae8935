//! Core types for Bazaar.
//!
//! All wire-facing types serialize with camelCase field names to match the
//! remote product/cart API.

pub mod cart;
pub mod id;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLine};
pub use id::*;
pub use product::{Dimensions, Product, ProductMeta, ProductPatch, Review};
pub use user::User;
