//! Bazaar Core - Shared types library.
//!
//! This crate provides the domain types used across all Bazaar components:
//! - `storefront` - Client library for the remote catalog/cart API
//! - `cli` - Command-line storefront frontend
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the `User`, `Product`, and `Cart` domain types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
