//! Business logic services for admin.
//!
//! # Services
//!
//! - `cashiers` - Cashier registration, listing and deletion

pub mod cashiers;

pub use cashiers::{AddedCashier, CashierError, CashierService};
