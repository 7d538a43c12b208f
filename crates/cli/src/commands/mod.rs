//! CLI command implementations.

pub mod ask;
pub mod catalog;
pub mod demo;
