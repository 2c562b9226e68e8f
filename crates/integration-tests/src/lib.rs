//! Integration tests for the Nature back office.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the admin server (the in-memory store needs no database)
//! CASHIER_STORE=memory cargo run -p nature-admin
//!
//! # Run the ignored tests against it
//! cargo test -p integration-tests -- --ignored
//! ```
//!
//! `ADMIN_BASE_URL` points the tests at a server other than
//! `http://localhost:3001`.

use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the admin server (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Digits derived from a fresh UUID, so repeated runs against the same
/// database do not collide on unique columns.
#[must_use]
pub fn unique_digits(len: u32) -> String {
    let modulus = 10_u128.pow(len);
    format!("{:0width$}", Uuid::new_v4().as_u128() % modulus, width = len as usize)
}

/// A valid cashier body with unique mobile, Aadhaar and email.
#[must_use]
pub fn unique_cashier(name: &str) -> Value {
    json!({
        "cashierName": name,
        "mobile": unique_digits(10),
        "aadhaar": unique_digits(12),
        "storeLocation": "Integration Store",
        "address": "1 Test Street",
        "email": format!("it-{}@example.com", Uuid::new_v4().simple()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_digits_shape() {
        for len in [10, 12] {
            let digits = unique_digits(len);
            assert_eq!(digits.len(), len as usize);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_unique_cashier_differs() {
        let a = unique_cashier("Jane Doe");
        let b = unique_cashier("Jane Doe");
        assert_ne!(a["email"], b["email"]);
    }
}
