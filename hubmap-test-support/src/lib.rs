//! Shared test utilities used across hubmap crates.

pub mod fixtures;
pub mod tracing;
