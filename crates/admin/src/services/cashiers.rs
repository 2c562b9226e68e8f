//! Cashier registry service.
//!
//! Orchestrates the add flow:
//! 1. Validate presence, then formats, of the six inputs
//! 2. Look up every record sharing the mobile, Aadhaar or email
//! 3. Derive a free username and a random password
//! 4. Insert, letting the store's unique constraints settle any race
//!
//! List and delete pass straight through to the store.

use secrecy::SecretString;
use thiserror::Error;
use tracing::{info, instrument, warn};

use nature_core::credentials::{self, UserNameGenerationError};
use nature_core::{
    CashierField, CashierId, CashierInput, FieldViolation, InputError, UserName, UserNameDomain,
};

use crate::db::{CashierLookup, CashierStore, RepositoryError};
use crate::models::{Cashier, NewCashierRecord};

/// Errors from cashier operations.
#[derive(Debug, Error)]
pub enum CashierError {
    /// One or more inputs were absent or blank.
    #[error("All fields are required")]
    MissingFields(Vec<FieldViolation>),

    /// One or more inputs failed their format rule.
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Existing records already hold some of the values.
    #[error("Duplicate entry found")]
    Duplicate(Vec<FieldViolation>),

    /// The store's uniqueness constraint rejected the insert.
    #[error("Conflicting entry")]
    Conflict(Vec<FieldViolation>),

    /// No cashier has this ID.
    #[error("Cashier not found")]
    NotFound(CashierId),

    /// Every numbered username for this handle is taken.
    #[error("no free username for handle {0}")]
    UserNamesExhausted(String),

    /// The store failed.
    #[error("cashier store error: {0}")]
    Store(#[source] RepositoryError),
}

impl CashierError {
    /// Field-level violations carried by client errors.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::MissingFields(v)
            | Self::Validation(v)
            | Self::Duplicate(v)
            | Self::Conflict(v) => v,
            Self::NotFound(_) | Self::UserNamesExhausted(_) | Self::Store(_) => &[],
        }
    }
}

impl From<InputError> for CashierError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Missing(v) => Self::MissingFields(v),
            InputError::Invalid(v) => Self::Validation(v),
        }
    }
}

impl From<RepositoryError> for CashierError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(fields) => {
                Self::Conflict(fields.into_iter().map(FieldViolation::conflict).collect())
            }
            RepositoryError::Invalid(fields) => Self::Validation(
                fields
                    .into_iter()
                    .map(FieldViolation::invalid_format)
                    .collect(),
            ),
            other => Self::Store(other),
        }
    }
}

impl From<UserNameGenerationError<RepositoryError>> for CashierError {
    fn from(err: UserNameGenerationError<RepositoryError>) -> Self {
        match err {
            UserNameGenerationError::InvalidName(_) => Self::Validation(vec![
                FieldViolation::invalid_format(CashierField::CashierName),
            ]),
            UserNameGenerationError::Exhausted(base) => Self::UserNamesExhausted(base),
            UserNameGenerationError::Lookup(e) => e.into(),
        }
    }
}

/// Credentials issued for a newly added cashier.
///
/// This is the only place the generated password is ever returned.
#[derive(Debug)]
pub struct AddedCashier {
    pub id: CashierId,
    pub user_name: UserName,
    pub password: SecretString,
}

/// Cashier registry service.
#[derive(Debug, Clone)]
pub struct CashierService<S> {
    store: S,
    domain: UserNameDomain,
}

impl<S: CashierStore> CashierService<S> {
    /// Create a new cashier service over `store`, issuing usernames in `domain`.
    #[must_use]
    pub const fn new(store: S, domain: UserNameDomain) -> Self {
        Self { store, domain }
    }

    /// The underlying record store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Register a cashier and issue their credentials.
    ///
    /// # Errors
    ///
    /// - [`CashierError::MissingFields`] if any input is blank
    /// - [`CashierError::Validation`] if a format rule fails
    /// - [`CashierError::Duplicate`] if another record shares a unique value
    /// - [`CashierError::Conflict`] if a concurrent insert won the race
    /// - [`CashierError::Store`] if the store fails
    #[instrument(skip(self, input))]
    pub async fn add_cashier(&self, input: &CashierInput) -> Result<AddedCashier, CashierError> {
        let cashier = input.validate()?;

        let lookup = CashierLookup::duplicates_of(&cashier);
        let existing = self.store.find_matching(&lookup).await?;
        if !existing.is_empty() {
            let duplicates = duplicate_violations(&lookup, &existing);
            warn!(
                fields = ?duplicates.iter().map(|v| v.field).collect::<Vec<_>>(),
                "Rejected duplicate cashier"
            );
            return Err(CashierError::Duplicate(duplicates));
        }

        let user_name =
            credentials::generate_unique_user_name(&cashier.cashier_name, &self.domain, |candidate| {
                let lookup = CashierLookup::user_name(candidate);
                async move {
                    let taken = self.store.find_one(&lookup).await?.is_some();
                    Ok::<_, RepositoryError>(taken)
                }
            })
            .await?;
        let password = credentials::generate_password();

        let stored = self
            .store
            .insert(NewCashierRecord {
                cashier,
                user_name,
                password,
            })
            .await?;

        info!(cashier_id = %stored.id, user_name = %stored.user_name, "Cashier added");

        Ok(AddedCashier {
            id: stored.id,
            user_name: stored.user_name,
            password: stored.password,
        })
    }

    /// All cashiers in store order.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub async fn list_cashiers(&self) -> Result<Vec<Cashier>, CashierError> {
        Ok(self.store.find_all().await?)
    }

    /// Delete a cashier by ID, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::NotFound`] if no cashier has this ID.
    #[instrument(skip(self), fields(cashier_id = %id))]
    pub async fn delete_cashier(&self, id: CashierId) -> Result<Cashier, CashierError> {
        let removed = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or(CashierError::NotFound(id))?;

        info!(user_name = %removed.user_name, "Cashier deleted");
        Ok(removed)
    }

    /// Check the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::Store`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), CashierError> {
        Ok(self.store.ping().await?)
    }
}

/// One violation per field held by any existing record, ordered
/// mobile, Aadhaar, email.
fn duplicate_violations(lookup: &CashierLookup, existing: &[Cashier]) -> Vec<FieldViolation> {
    [CashierField::Mobile, CashierField::Aadhaar, CashierField::Email]
        .into_iter()
        .filter(|field| {
            existing
                .iter()
                .any(|c| lookup.matched_fields(c).contains(field))
        })
        .map(FieldViolation::duplicate)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use nature_core::ViolationCode;

    use super::*;
    use crate::db::MemoryCashierStore;

    fn service() -> CashierService<MemoryCashierStore> {
        CashierService::new(MemoryCashierStore::new(), UserNameDomain::default())
    }

    fn input(name: &str, mobile: &str, aadhaar: &str, email: &str) -> CashierInput {
        CashierInput {
            cashier_name: Some(name.to_owned()),
            mobile: Some(mobile.to_owned()),
            aadhaar: Some(aadhaar.to_owned()),
            store_location: Some("Pune".to_owned()),
            address: Some("12 MG Road".to_owned()),
            email: Some(email.to_owned()),
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<CashierField> {
        violations.iter().map(|v| v.field).collect()
    }

    #[tokio::test]
    async fn test_add_stores_inputs_and_issues_credentials() {
        let service = service();
        let added = service
            .add_cashier(&input("Jane Doe", "9876543210", "123456789012", "Jane@X.com"))
            .await
            .unwrap();

        assert_eq!(added.user_name.as_str(), "jd@nature.com");
        let password = added.password.expose_secret();
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

        let all = service.list_cashiers().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, added.id);
        assert_eq!(all[0].mobile.as_str(), "9876543210");
        assert_eq!(all[0].aadhaar.as_str(), "123456789012");
        assert_eq!(all[0].email.as_str(), "jane@x.com");
        assert_eq!(all[0].password.expose_secret(), password);
    }

    #[tokio::test]
    async fn test_add_short_names() {
        let service = service();
        let al = service
            .add_cashier(&input("Al", "1111111111", "111111111111", "al@x.com"))
            .await
            .unwrap();
        let a = service
            .add_cashier(&input("A", "2222222222", "222222222222", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(al.user_name.as_str(), "al@nature.com");
        assert_eq!(a.user_name.as_str(), "a@nature.com");
    }

    #[tokio::test]
    async fn test_add_numbers_colliding_user_names() {
        let service = service();
        let first = service
            .add_cashier(&input("Jane Doe", "1111111111", "111111111111", "jane@x.com"))
            .await
            .unwrap();
        let second = service
            .add_cashier(&input("John Dean", "2222222222", "222222222222", "john@x.com"))
            .await
            .unwrap();
        let third = service
            .add_cashier(&input("Jay Dutt", "3333333333", "333333333333", "jay@x.com"))
            .await
            .unwrap();

        assert_eq!(first.user_name.as_str(), "jd@nature.com");
        assert_eq!(second.user_name.as_str(), "jd1@nature.com");
        assert_eq!(third.user_name.as_str(), "jd2@nature.com");
    }

    #[tokio::test]
    async fn test_add_uses_configured_domain() {
        let service = CashierService::new(
            MemoryCashierStore::new(),
            UserNameDomain::parse("staff.nature.in").unwrap(),
        );
        let added = service
            .add_cashier(&input("Al", "1111111111", "111111111111", "al@x.com"))
            .await
            .unwrap();
        assert_eq!(added.user_name.as_str(), "al@staff.nature.in");
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_without_write() {
        let service = service();
        let mut partial = input("Jane Doe", "9876543210", "123456789012", "jane@x.com");
        partial.address = Some("   ".to_owned());
        partial.cashier_name = None;

        let err = service.add_cashier(&partial).await.unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        assert_eq!(
            fields(err.violations()),
            vec![CashierField::CashierName, CashierField::Address]
        );
        assert!(service.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_bad_formats_rejected_before_store() {
        let service = service();
        let err = service
            .add_cashier(&input("Jane Doe", "98765", "1234567890123", "jane@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, CashierError::Validation(_)));
        assert_eq!(
            fields(err.violations()),
            vec![CashierField::Mobile, CashierField::Aadhaar]
        );
        assert_eq!(err.violations()[0].message, "Mobile must be a 10-digit number");
        assert!(service.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_mobile_rejected() {
        let service = service();
        service
            .add_cashier(&input("Jane Doe", "9876543210", "123456789012", "jane@x.com"))
            .await
            .unwrap();

        let err = service
            .add_cashier(&input("John Roe", "9876543210", "999999999999", "john@x.com"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Duplicate entry found");
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, CashierField::Mobile);
        assert_eq!(err.violations()[0].code, ViolationCode::Duplicate);
        assert_eq!(err.violations()[0].message, "Mobile number already exists");
        assert_eq!(service.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicates_across_records_reported_in_order() {
        let service = service();
        service
            .add_cashier(&input("Jane Doe", "1111111111", "111111111111", "jane@x.com"))
            .await
            .unwrap();
        service
            .add_cashier(&input("John Roe", "2222222222", "222222222222", "john@x.com"))
            .await
            .unwrap();

        let err = service
            .add_cashier(&input("Max Poe", "2222222222", "333333333333", "JANE@x.com"))
            .await
            .unwrap_err();

        assert_eq!(
            fields(err.violations()),
            vec![CashierField::Mobile, CashierField::Email]
        );
        assert_eq!(err.violations()[1].message, "Email already exists");
    }

    #[tokio::test]
    async fn test_delete_existing_then_missing() {
        let service = service();
        let added = service
            .add_cashier(&input("Jane Doe", "9876543210", "123456789012", "jane@x.com"))
            .await
            .unwrap();

        let removed = service.delete_cashier(added.id).await.unwrap();
        assert_eq!(removed.id, added.id);
        assert!(service.list_cashiers().await.unwrap().is_empty());

        for _ in 0..2 {
            let err = service.delete_cashier(added.id).await.unwrap_err();
            assert!(matches!(err, CashierError::NotFound(id) if id == added.id));
        }
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let service = service();
        let first = service
            .add_cashier(&input("Jane Doe", "1111111111", "111111111111", "jane@x.com"))
            .await
            .unwrap();
        let second = service
            .add_cashier(&input("John Roe", "2222222222", "222222222222", "john@x.com"))
            .await
            .unwrap();

        service.delete_cashier(first.id).await.unwrap();
        let remaining = service.list_cashiers().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[tokio::test]
    async fn test_unusable_name_is_a_validation_error() {
        let service = service();
        let err = service
            .add_cashier(&input("@x", "9876543210", "123456789012", "jane@x.com"))
            .await
            .unwrap_err();
        assert_eq!(fields(err.violations()), vec![CashierField::CashierName]);
        assert!(service.store().is_empty().await);
    }

    /// Store whose reads never see anything, so every pre-check passes and
    /// only the insert's constraints can reject a duplicate.
    #[derive(Debug, Clone, Default)]
    struct BlindStore(MemoryCashierStore);

    impl CashierStore for BlindStore {
        async fn find_one(&self, _: &CashierLookup) -> Result<Option<Cashier>, RepositoryError> {
            Ok(None)
        }

        async fn find_matching(&self, _: &CashierLookup) -> Result<Vec<Cashier>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError> {
            self.0.find_all().await
        }

        async fn insert(&self, record: NewCashierRecord) -> Result<Cashier, RepositoryError> {
            self.0.insert(record).await
        }

        async fn delete_by_id(&self, id: CashierId) -> Result<Option<Cashier>, RepositoryError> {
            self.0.delete_by_id(id).await
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_lost_race_surfaces_as_conflict() {
        let service = CashierService::new(BlindStore::default(), UserNameDomain::default());
        service
            .add_cashier(&input("Jane Doe", "9876543210", "123456789012", "jane@x.com"))
            .await
            .unwrap();

        let err = service
            .add_cashier(&input("John Dean", "9876543210", "999999999999", "john@x.com"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Conflicting entry");
        assert_eq!(
            fields(err.violations()),
            vec![CashierField::UserName, CashierField::Mobile]
        );
        assert!(
            err.violations()
                .iter()
                .all(|v| v.code == ViolationCode::Conflict)
        );
        assert_eq!(service.store().0.len().await, 1);
    }

    #[test]
    fn test_store_errors_map_by_kind() {
        let err: CashierError = RepositoryError::Invalid(vec![CashierField::Aadhaar]).into();
        assert!(matches!(err, CashierError::Validation(_)));
        assert_eq!(err.violations()[0].code, ViolationCode::InvalidFormat);

        let err: CashierError = RepositoryError::DataCorruption("bad".to_owned()).into();
        assert!(matches!(err, CashierError::Store(_)));
        assert!(err.violations().is_empty());
    }
}
