//! Field-level validation errors for cashier records.
//!
//! Every rejection the registry produces is expressed as one or more
//! [`FieldViolation`]s, so clients map errors onto form inputs by `field`
//! and `code` instead of matching message text.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A field of a cashier record that can be reported in a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CashierField {
    CashierName,
    UserName,
    Mobile,
    Aadhaar,
    StoreLocation,
    Address,
    Email,
}

impl CashierField {
    /// The six fields an administrator supplies, in form order.
    pub const INPUTS: [Self; 6] = [
        Self::CashierName,
        Self::Mobile,
        Self::Aadhaar,
        Self::StoreLocation,
        Self::Address,
        Self::Email,
    ];

    /// Wire name of the field (matches the JSON property).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashierName => "cashierName",
            Self::UserName => "userName",
            Self::Mobile => "mobile",
            Self::Aadhaar => "aadhaar",
            Self::StoreLocation => "storeLocation",
            Self::Address => "address",
            Self::Email => "email",
        }
    }

    /// Human-readable label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CashierName => "Cashier name",
            Self::UserName => "Username",
            Self::Mobile => "Mobile number",
            Self::Aadhaar => "Aadhaar number",
            Self::StoreLocation => "Store location",
            Self::Address => "Address",
            Self::Email => "Email",
        }
    }

    const fn format_message(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile must be a 10-digit number",
            Self::Aadhaar => "Aadhaar must be a 12-digit number",
            Self::Email => "Please fill a valid email address",
            Self::UserName => "Username is not a valid login handle",
            Self::CashierName | Self::StoreLocation | Self::Address => "Value is not valid",
        }
    }
}

impl fmt::Display for CashierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason for a [`FieldViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The field was absent or blank.
    Required,
    /// The field did not match its format.
    InvalidFormat,
    /// Another record already holds this value (found before writing).
    Duplicate,
    /// The store's uniqueness constraint rejected the write.
    Conflict,
}

/// One rejected field with a code and a display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: CashierField,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    /// The field was left blank.
    #[must_use]
    pub fn required(field: CashierField) -> Self {
        Self {
            field,
            code: ViolationCode::Required,
            message: format!("{} is required", field.label()),
        }
    }

    /// The field failed its format rule.
    #[must_use]
    pub fn invalid_format(field: CashierField) -> Self {
        Self {
            field,
            code: ViolationCode::InvalidFormat,
            message: field.format_message().to_owned(),
        }
    }

    /// An existing record already holds the value.
    #[must_use]
    pub fn duplicate(field: CashierField) -> Self {
        Self {
            field,
            code: ViolationCode::Duplicate,
            message: format!("{} already exists", field.label()),
        }
    }

    /// The store rejected the value on insert.
    #[must_use]
    pub fn conflict(field: CashierField) -> Self {
        Self {
            field,
            code: ViolationCode::Conflict,
            message: format!("{} already exists", field.label()),
        }
    }
}
