//! Fixed-length numeric identifiers (mobile numbers, Aadhaar numbers).
//!
//! Both are stored as strings so leading zeros survive, but must consist of
//! exactly N ASCII decimal digits.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a fixed-length digit string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DigitsError {
    /// The input string is empty.
    #[error("value cannot be empty")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("value must contain only digits 0-9")]
    NonDigit,
    /// The input has the wrong number of digits.
    #[error("value must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },
}

/// Parse `s` (trimmed) as exactly `len` ASCII digits.
fn parse_digits(s: &str, len: usize) -> Result<String, DigitsError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DigitsError::Empty);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DigitsError::NonDigit);
    }
    if s.len() != len {
        return Err(DigitsError::WrongLength {
            expected: len,
            actual: s.len(),
        });
    }
    Ok(s.to_owned())
}

/// Macro to define a fixed-length digit string newtype.
///
/// Generates `parse()`, `as_str()`, `Display`, `FromStr`, `AsRef<str>` and
/// (with the `postgres` feature) `sqlx` `Type`/`Encode` implementations.
macro_rules! define_digits {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Required number of digits.
            pub const LENGTH: usize = $len;

            /// Parse from a string, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the trimmed input is empty, contains a
            /// non-digit, or is not exactly [`Self::LENGTH`] digits long.
            pub fn parse(s: &str) -> Result<Self, DigitsError> {
                parse_digits(s, Self::LENGTH).map(Self)
            }

            /// Returns the digits as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the value and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = DigitsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_digits!(
    /// A 10-digit mobile phone number.
    Mobile,
    10
);

define_digits!(
    /// A 12-digit Aadhaar (national ID) number.
    Aadhaar,
    12
);
