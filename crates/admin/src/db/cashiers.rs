//! `PostgreSQL` cashier repository.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate builds
//! without a live database.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use nature_core::{Aadhaar, CashierField, CashierId, Email, Mobile, UserName};

use super::{CashierLookup, CashierStore, RepositoryError};
use crate::models::{Cashier, NewCashierRecord};

const CASHIER_COLUMNS: &str = "id, cashier_name, user_name, mobile, aadhaar, store_location, \
                               address, email, password, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` cashier queries.
#[derive(Debug, sqlx::FromRow)]
struct CashierRow {
    id: i32,
    cashier_name: String,
    user_name: String,
    mobile: String,
    aadhaar: String,
    store_location: String,
    address: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CashierRow> for Cashier {
    type Error = RepositoryError;

    fn try_from(row: CashierRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: &dyn std::fmt::Display| {
            RepositoryError::DataCorruption(format!("invalid {what} in database: {e}"))
        };

        Ok(Self {
            id: CashierId::new(row.id),
            cashier_name: row.cashier_name,
            user_name: UserName::parse(&row.user_name).map_err(|e| corrupt("user_name", &e))?,
            mobile: Mobile::parse(&row.mobile).map_err(|e| corrupt("mobile", &e))?,
            aadhaar: Aadhaar::parse(&row.aadhaar).map_err(|e| corrupt("aadhaar", &e))?,
            store_location: row.store_location,
            address: row.address,
            email: Email::parse(&row.email).map_err(|e| corrupt("email", &e))?,
            password: SecretString::from(row.password),
            created_at: row.created_at,
        })
    }
}

/// Map a named table constraint back to the field it guards.
fn constraint_field(constraint: &str) -> Option<CashierField> {
    match constraint {
        "cashier_user_name_key" | "cashier_user_name_check" => Some(CashierField::UserName),
        "cashier_mobile_key" | "cashier_mobile_check" => Some(CashierField::Mobile),
        "cashier_aadhaar_key" | "cashier_aadhaar_check" => Some(CashierField::Aadhaar),
        "cashier_email_key" | "cashier_email_check" => Some(CashierField::Email),
        "cashier_cashier_name_check" => Some(CashierField::CashierName),
        "cashier_store_location_check" => Some(CashierField::StoreLocation),
        "cashier_address_check" => Some(CashierField::Address),
        _ => None,
    }
}

/// Translate constraint violations on insert into field-level errors.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        let fields: Vec<CashierField> = db_err
            .constraint()
            .and_then(constraint_field)
            .into_iter()
            .collect();
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(fields);
        }
        if db_err.is_check_violation() {
            return RepositoryError::Invalid(fields);
        }
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cashier database operations.
#[derive(Debug, Clone)]
pub struct PgCashierRepository {
    pool: PgPool,
}

impl PgCashierRepository {
    /// Create a new cashier repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_matching(
        &self,
        lookup: &CashierLookup,
        limit: Option<i64>,
    ) -> Result<Vec<Cashier>, RepositoryError> {
        let sql = format!(
            "SELECT {CASHIER_COLUMNS} FROM admin.cashier \
             WHERE mobile = $1 OR aadhaar = $2 OR email = $3 OR user_name = $4 \
             ORDER BY id \
             LIMIT $5"
        );

        let rows = sqlx::query_as::<_, CashierRow>(&sql)
            .bind(lookup.mobile.as_ref())
            .bind(lookup.aadhaar.as_ref())
            .bind(lookup.email.as_ref())
            .bind(lookup.user_name.as_ref())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

impl CashierStore for PgCashierRepository {
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    async fn find_one(&self, lookup: &CashierLookup) -> Result<Option<Cashier>, RepositoryError> {
        Ok(self.fetch_matching(lookup, Some(1)).await?.into_iter().next())
    }

    async fn find_matching(&self, lookup: &CashierLookup) -> Result<Vec<Cashier>, RepositoryError> {
        self.fetch_matching(lookup, None).await
    }

    async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError> {
        let sql = format!("SELECT {CASHIER_COLUMNS} FROM admin.cashier ORDER BY id");

        let rows = sqlx::query_as::<_, CashierRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a unique column already holds the value.
    /// Returns `RepositoryError::Invalid` if a check constraint rejects a value.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert(&self, record: NewCashierRecord) -> Result<Cashier, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin.cashier \
             (cashier_name, user_name, mobile, aadhaar, store_location, address, email, password) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CASHIER_COLUMNS}"
        );

        let NewCashierRecord {
            cashier,
            user_name,
            password,
        } = record;

        let row = sqlx::query_as::<_, CashierRow>(&sql)
            .bind(&cashier.cashier_name)
            .bind(&user_name)
            .bind(&cashier.mobile)
            .bind(&cashier.aadhaar)
            .bind(&cashier.store_location)
            .bind(&cashier.address)
            .bind(&cashier.email)
            .bind(password.expose_secret())
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        row.try_into()
    }

    async fn delete_by_id(&self, id: CashierId) -> Result<Option<Cashier>, RepositoryError> {
        let sql = format!("DELETE FROM admin.cashier WHERE id = $1 RETURNING {CASHIER_COLUMNS}");

        let row = sqlx::query_as::<_, CashierRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_field_mapping() {
        assert_eq!(
            constraint_field("cashier_mobile_key"),
            Some(CashierField::Mobile)
        );
        assert_eq!(
            constraint_field("cashier_aadhaar_check"),
            Some(CashierField::Aadhaar)
        );
        assert_eq!(
            constraint_field("cashier_user_name_key"),
            Some(CashierField::UserName)
        );
        assert_eq!(constraint_field("cashier_pkey"), None);
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = map_insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }
}
