//! Nature Core - Shared cashier domain types.
//!
//! This crate provides the types and pure logic used across the back office:
//! - `admin` - Cashier registry service, HTTP API and form UI
//! - `cli` - Command-line tools for migrations and cashier management
//!
//! # Architecture
//!
//! The core crate contains only types, validation and credential generation -
//! no database access, no HTTP. Uniqueness checks are supplied by the caller
//! as async predicates so the same generator works against any record store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, phone/ID numbers, usernames
//!   and field-level validation errors
//! - [`credentials`] - Username derivation and password generation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod credentials;
pub mod types;

pub use types::*;
