//! Administrator-supplied cashier input and its validation.

use serde::Deserialize;

use super::{Aadhaar, CashierField, Email, FieldViolation, Mobile};

/// Raw cashier fields as submitted by a form or JSON body.
///
/// Every field is optional so that absent keys reach validation and are
/// reported as missing instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierInput {
    #[serde(default)]
    pub cashier_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub aadhaar: Option<String>,
    #[serde(default)]
    pub store_location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A validated cashier ready for duplicate detection and persistence.
///
/// Text fields are trimmed; the email is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCashier {
    pub cashier_name: String,
    pub mobile: Mobile,
    pub aadhaar: Aadhaar,
    pub store_location: String,
    pub address: String,
    pub email: Email,
}

/// Why a [`CashierInput`] was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One or more fields were absent or blank.
    #[error("All fields are required")]
    Missing(Vec<FieldViolation>),
    /// One or more fields failed their format rule.
    #[error("Validation failed")]
    Invalid(Vec<FieldViolation>),
}

impl InputError {
    /// The individual field violations.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Missing(v) | Self::Invalid(v) => v,
        }
    }
}

impl CashierInput {
    /// Raw value of an input field, if present.
    #[must_use]
    pub fn get(&self, field: CashierField) -> Option<&str> {
        match field {
            CashierField::CashierName => self.cashier_name.as_deref(),
            CashierField::Mobile => self.mobile.as_deref(),
            CashierField::Aadhaar => self.aadhaar.as_deref(),
            CashierField::StoreLocation => self.store_location.as_deref(),
            CashierField::Address => self.address.as_deref(),
            CashierField::Email => self.email.as_deref(),
            CashierField::UserName => None,
        }
    }

    /// Validate presence first, then formats.
    ///
    /// Presence failures are reported alone; format rules only run once all
    /// six fields are non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Missing`] listing every blank field in form
    /// order, or [`InputError::Invalid`] listing every malformed field.
    pub fn validate(&self) -> Result<NewCashier, InputError> {
        let missing: Vec<FieldViolation> = CashierField::INPUTS
            .into_iter()
            .filter(|&field| self.get(field).is_none_or(|v| v.trim().is_empty()))
            .map(FieldViolation::required)
            .collect();
        if !missing.is_empty() {
            return Err(InputError::Missing(missing));
        }

        let text = |field| self.get(field).unwrap_or_default().trim();

        let mobile = Mobile::parse(text(CashierField::Mobile));
        let aadhaar = Aadhaar::parse(text(CashierField::Aadhaar));
        let email = Email::parse(text(CashierField::Email));

        match (mobile, aadhaar, email) {
            (Ok(mobile), Ok(aadhaar), Ok(email)) => Ok(NewCashier {
                cashier_name: text(CashierField::CashierName).to_owned(),
                mobile,
                aadhaar,
                store_location: text(CashierField::StoreLocation).to_owned(),
                address: text(CashierField::Address).to_owned(),
                email,
            }),
            (mobile, aadhaar, email) => {
                let mut invalid = Vec::new();
                if mobile.is_err() {
                    invalid.push(FieldViolation::invalid_format(CashierField::Mobile));
                }
                if aadhaar.is_err() {
                    invalid.push(FieldViolation::invalid_format(CashierField::Aadhaar));
                }
                if email.is_err() {
                    invalid.push(FieldViolation::invalid_format(CashierField::Email));
                }
                Err(InputError::Invalid(invalid))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ViolationCode;

    fn valid_input() -> CashierInput {
        CashierInput {
            cashier_name: Some("  Jane Doe ".to_owned()),
            mobile: Some("9876543210".to_owned()),
            aadhaar: Some("123412341234".to_owned()),
            store_location: Some("Koramangala".to_owned()),
            address: Some("12 MG Road, Bengaluru".to_owned()),
            email: Some("Jane.Doe@Example.com".to_owned()),
        }
    }

    #[test]
    fn test_validate_ok_trims_and_normalizes() {
        let cashier = valid_input().validate().unwrap();
        assert_eq!(cashier.cashier_name, "Jane Doe");
        assert_eq!(cashier.mobile.as_str(), "9876543210");
        assert_eq!(cashier.aadhaar.as_str(), "123412341234");
        assert_eq!(cashier.email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn test_validate_missing_fields_in_form_order() {
        let input = CashierInput {
            address: Some("   ".to_owned()),
            email: None,
            cashier_name: None,
            ..valid_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                CashierField::CashierName,
                CashierField::Address,
                CashierField::Email
            ]
        );
        assert!(
            err.violations()
                .iter()
                .all(|v| v.code == ViolationCode::Required)
        );
    }

    #[test]
    fn test_missing_takes_precedence_over_format() {
        let input = CashierInput {
            mobile: Some("123".to_owned()),
            email: Some(String::new()),
            ..valid_input()
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, InputError::Missing(ref v) if v.len() == 1));
    }

    #[test]
    fn test_validate_reports_every_bad_format() {
        let input = CashierInput {
            mobile: Some("98765".to_owned()),
            aadhaar: Some("1234-1234-1234".to_owned()),
            email: Some("not-an-email".to_owned()),
            ..valid_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed");
        let messages: Vec<_> = err.violations().iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Mobile must be a 10-digit number",
                "Aadhaar must be a 12-digit number",
                "Please fill a valid email address",
            ]
        );
    }

    #[test]
    fn test_deserialize_camel_case_with_absent_keys() {
        let input: CashierInput =
            serde_json::from_str(r#"{"cashierName":"Al","storeLocation":"X"}"#).unwrap();
        assert_eq!(input.cashier_name.as_deref(), Some("Al"));
        assert_eq!(input.store_location.as_deref(), Some("X"));
        assert!(input.mobile.is_none());
    }
}
