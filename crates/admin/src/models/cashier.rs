//! Cashier domain types.
//!
//! These types represent validated records as held by a cashier store.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use nature_core::{Aadhaar, CashierId, Email, Mobile, NewCashier, UserName};

/// A stored cashier (domain type).
#[derive(Debug, Clone)]
pub struct Cashier {
    /// Store-assigned ID.
    pub id: CashierId,
    /// Display name.
    pub cashier_name: String,
    /// Generated login handle.
    pub user_name: UserName,
    /// 10-digit mobile number.
    pub mobile: Mobile,
    /// 12-digit Aadhaar number.
    pub aadhaar: Aadhaar,
    /// Store the cashier works at.
    pub store_location: String,
    /// Postal address.
    pub address: String,
    /// Lower-case email address.
    pub email: Email,
    /// Generated password (stored as issued, only disclosed at creation).
    pub password: SecretString,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Everything a store needs to insert a cashier.
#[derive(Debug, Clone)]
pub struct NewCashierRecord {
    pub cashier: NewCashier,
    pub user_name: UserName,
    pub password: SecretString,
}
