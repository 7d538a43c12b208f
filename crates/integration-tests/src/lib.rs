//! Integration tests for MayGloss.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maygloss-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_lifecycle` - The full shop/bag/checkout scenario across the
//!   cart store, router, checkout flow, and notification bus
//! - `persistence` - Durable cart slot behavior across store instances
