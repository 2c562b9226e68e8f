//! Cashier login handles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserName`] or [`UserNameDomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    #[error("username cannot be empty")]
    Empty,
    #[error("username must be lower-case")]
    NotLowercase,
    #[error("username must not contain whitespace")]
    Whitespace,
    #[error("username must have exactly one @ with a handle before it")]
    MalformedHandle,
    #[error("domain must be a bare host name such as nature.com")]
    InvalidDomain,
}

/// The domain every generated username ends with (`<handle>@<domain>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserNameDomain(String);

impl UserNameDomain {
    /// Domain used when none is configured.
    pub const DEFAULT: &'static str = "nature.com";

    /// Parse a domain, lower-casing it.
    ///
    /// # Errors
    ///
    /// Returns [`UserNameError::InvalidDomain`] if the domain is blank,
    /// contains `@` or whitespace, or starts/ends with a dot.
    pub fn parse(s: &str) -> Result<Self, UserNameError> {
        let s = s.trim().to_lowercase();
        if s.is_empty()
            || s.contains('@')
            || s.chars().any(char::is_whitespace)
            || s.starts_with('.')
            || s.ends_with('.')
        {
            return Err(UserNameError::InvalidDomain);
        }
        Ok(Self(s))
    }

    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserNameDomain {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for UserNameDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cashier's login handle, e.g. `jd1@nature.com`.
///
/// Always lower-case, without whitespace, with a non-empty handle before a
/// single `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Build `<handle>@<domain>`, lower-casing the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty or contains `@` or whitespace.
    pub fn from_parts(handle: &str, domain: &UserNameDomain) -> Result<Self, UserNameError> {
        Self::parse(&format!("{}@{}", handle.to_lowercase(), domain.as_str()))
    }

    /// Parse a stored username.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, not lower-case, contains
    /// whitespace, or lacks a handle before exactly one `@`.
    pub fn parse(s: &str) -> Result<Self, UserNameError> {
        if s.is_empty() {
            return Err(UserNameError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(UserNameError::Whitespace);
        }
        if s.to_lowercase() != s {
            return Err(UserNameError::NotLowercase);
        }
        match s.split_once('@') {
            Some((handle, domain))
                if !handle.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(UserNameError::MalformedHandle),
        }
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `@`.
    #[must_use]
    pub fn handle(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Consumes the value and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_lowercases_handle() {
        let domain = UserNameDomain::default();
        let name = UserName::from_parts("JD1", &domain).unwrap();
        assert_eq!(name.as_str(), "jd1@nature.com");
        assert_eq!(name.handle(), "jd1");
    }

    #[test]
    fn test_from_parts_rejects_empty_handle() {
        let domain = UserNameDomain::default();
        assert_eq!(
            UserName::from_parts("", &domain),
            Err(UserNameError::MalformedHandle)
        );
    }

    #[test]
    fn test_parse_rejects_upper_case() {
        assert_eq!(
            UserName::parse("JD@nature.com"),
            Err(UserNameError::NotLowercase)
        );
    }

    #[test]
    fn test_parse_rejects_double_at() {
        assert_eq!(
            UserName::parse("a@b@nature.com"),
            Err(UserNameError::MalformedHandle)
        );
    }

    #[test]
    fn test_domain_parse() {
        assert_eq!(
            UserNameDomain::parse(" Staff.Nature.COM ").unwrap().as_str(),
            "staff.nature.com"
        );
        assert!(UserNameDomain::parse("").is_err());
        assert!(UserNameDomain::parse("@nature.com").is_err());
        assert!(UserNameDomain::parse("nature .com").is_err());
        assert!(UserNameDomain::parse(".com").is_err());
    }
}
