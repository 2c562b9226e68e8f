//! Nature back-office admin library.
//!
//! Cashier registry: a JSON API and server-rendered screens for registering
//! cashier staff, issuing their login credentials, listing and removing them.
//! Exposed as a library so the CLI and tests can drive the same service.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
