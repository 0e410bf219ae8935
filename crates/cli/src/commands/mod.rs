//! CLI command implementations, one module per screen of the storefront.

pub mod cart;
pub mod products;
pub mod session;
