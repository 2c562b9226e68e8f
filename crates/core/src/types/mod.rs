//! Core types for the cashier registry.
//!
//! This module provides type-safe wrappers for the cashier record's
//! constrained fields.

pub mod digits;
pub mod email;
pub mod field;
pub mod id;
pub mod input;
pub mod user_name;

pub use digits::{Aadhaar, DigitsError, Mobile};
pub use email::{Email, EmailError};
pub use field::{CashierField, FieldViolation, ViolationCode};
pub use id::*;
pub use input::{CashierInput, InputError, NewCashier};
pub use user_name::{UserName, UserNameDomain, UserNameError};
