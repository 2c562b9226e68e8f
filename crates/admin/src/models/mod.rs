//! Domain models for admin.

pub mod cashier;

pub use cashier::{Cashier, NewCashierRecord};
