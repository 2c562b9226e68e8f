//! CLI command implementations.

pub mod cashier;
pub mod migrate;
