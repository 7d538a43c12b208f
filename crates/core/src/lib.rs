//! MayGloss Core - Shared types library.
//!
//! This crate provides common types used across all MayGloss components:
//! - `storefront` - The order-lifecycle library (cart, checkout, routing)
//! - `cli` - Command-line tools for browsing the catalog and demos
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   product and cart-item shapes shared by persistence and checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
