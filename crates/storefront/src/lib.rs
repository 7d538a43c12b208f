//! MayGloss Storefront - the order-lifecycle library.
//!
//! This crate implements the storefront's core state machines, independent
//! of any rendering layer:
//!
//! - [`cart`] - The shopper's bag: quantity invariants, totals, and
//!   write-through persistence
//! - [`persist`] - The durable cart slot (file-backed, best-effort)
//! - [`router`] - Page navigation driven by location tokens
//! - [`checkout`] - The shipping/payment/confirmation flow and pricing
//! - [`notify`] - The cross-component toast notification bus
//! - [`catalog`] - The static product catalog
//! - [`assistant`] - The beauty concierge collaborator (Gemini API)
//! - [`state`] - [`state::AppState`] wiring all of the above together
//!
//! # Concurrency
//!
//! The system is single-user and event-driven. Stores are cheaply
//! cloneable handles over shared interior state; the only suspension
//! points are notification expiry timers and the simulated payment
//! latency, neither of which holds a lock while suspended.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod persist;
pub mod router;
pub mod state;
