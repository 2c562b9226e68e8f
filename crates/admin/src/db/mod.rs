//! Cashier record stores.
//!
//! # Tables
//!
//! - `admin.cashier` - Cashier staff records with named unique and check
//!   constraints on `user_name`, `mobile`, `aadhaar` and `email`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p nature-cli -- migrate
//! ```
//!
//! # Implementations
//!
//! - [`PgCashierRepository`] - `PostgreSQL`, used in production
//! - [`MemoryCashierStore`] - process-local, used by tests and `CASHIER_STORE=memory`
//!
//! Both enforce the uniqueness invariants atomically on insert, so the
//! service's duplicate pre-check is only a fast path.

pub mod cashiers;
pub mod memory;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use nature_core::{Aadhaar, CashierField, CashierId, Email, Mobile, NewCashier, UserName};

pub use cashiers::PgCashierRepository;
pub use memory::MemoryCashierStore;

use crate::config::StoreConfig;
use crate::models::{Cashier, NewCashierRecord};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation on insert.
    #[error("unique constraint violated on [{}]", join_fields(.0))]
    Conflict(Vec<CashierField>),

    /// Check constraint violation on insert.
    #[error("check constraint violated on [{}]", join_fields(.0))]
    Invalid(Vec<CashierField>),
}

fn join_fields(fields: &[CashierField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A disjunctive equality lookup: a record matches if any populated field
/// equals the record's value. An empty lookup matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashierLookup {
    pub mobile: Option<Mobile>,
    pub aadhaar: Option<Aadhaar>,
    pub email: Option<Email>,
    pub user_name: Option<UserName>,
}

impl CashierLookup {
    /// Match on the login handle only.
    #[must_use]
    pub fn user_name(user_name: UserName) -> Self {
        Self {
            user_name: Some(user_name),
            ..Self::default()
        }
    }

    /// Match any record sharing the mobile, Aadhaar or email of `cashier`.
    #[must_use]
    pub fn duplicates_of(cashier: &NewCashier) -> Self {
        Self {
            mobile: Some(cashier.mobile.clone()),
            aadhaar: Some(cashier.aadhaar.clone()),
            email: Some(cashier.email.clone()),
            user_name: None,
        }
    }

    /// Fields of `cashier` equal to this lookup, in the order
    /// mobile, Aadhaar, email, username.
    #[must_use]
    pub fn matched_fields(&self, cashier: &Cashier) -> Vec<CashierField> {
        let mut fields = Vec::new();
        if self.mobile.as_ref() == Some(&cashier.mobile) {
            fields.push(CashierField::Mobile);
        }
        if self.aadhaar.as_ref() == Some(&cashier.aadhaar) {
            fields.push(CashierField::Aadhaar);
        }
        if self.email.as_ref() == Some(&cashier.email) {
            fields.push(CashierField::Email);
        }
        if self.user_name.as_ref() == Some(&cashier.user_name) {
            fields.push(CashierField::UserName);
        }
        fields
    }

    /// Whether `cashier` matches any populated field.
    #[must_use]
    pub fn matches(&self, cashier: &Cashier) -> bool {
        !self.matched_fields(cashier).is_empty()
    }
}

/// Persistence contract for cashier records.
///
/// `insert` must enforce uniqueness of username, mobile, Aadhaar and email
/// atomically and report violations as [`RepositoryError::Conflict`].
pub trait CashierStore: Send + Sync {
    /// First record (lowest id) matching `lookup`.
    fn find_one(
        &self,
        lookup: &CashierLookup,
    ) -> impl Future<Output = Result<Option<Cashier>, RepositoryError>> + Send;

    /// Every record matching `lookup`, in store order.
    fn find_matching(
        &self,
        lookup: &CashierLookup,
    ) -> impl Future<Output = Result<Vec<Cashier>, RepositoryError>> + Send;

    /// Every record, in store order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Cashier>, RepositoryError>> + Send;

    /// Persist a new record, assigning `id` and `created_at`.
    fn insert(
        &self,
        record: NewCashierRecord,
    ) -> impl Future<Output = Result<Cashier, RepositoryError>> + Send;

    /// Remove a record, returning it if it existed.
    fn delete_by_id(
        &self,
        id: CashierId,
    ) -> impl Future<Output = Result<Option<Cashier>, RepositoryError>> + Send;

    /// Check the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// The store selected at startup.
#[derive(Debug, Clone)]
pub enum AnyCashierStore {
    Postgres(PgCashierRepository),
    Memory(MemoryCashierStore),
}

impl CashierStore for AnyCashierStore {
    async fn find_one(&self, lookup: &CashierLookup) -> Result<Option<Cashier>, RepositoryError> {
        match self {
            Self::Postgres(store) => store.find_one(lookup).await,
            Self::Memory(store) => store.find_one(lookup).await,
        }
    }

    async fn find_matching(&self, lookup: &CashierLookup) -> Result<Vec<Cashier>, RepositoryError> {
        match self {
            Self::Postgres(store) => store.find_matching(lookup).await,
            Self::Memory(store) => store.find_matching(lookup).await,
        }
    }

    async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError> {
        match self {
            Self::Postgres(store) => store.find_all().await,
            Self::Memory(store) => store.find_all().await,
        }
    }

    async fn insert(&self, record: NewCashierRecord) -> Result<Cashier, RepositoryError> {
        match self {
            Self::Postgres(store) => store.insert(record).await,
            Self::Memory(store) => store.insert(record).await,
        }
    }

    async fn delete_by_id(&self, id: CashierId) -> Result<Option<Cashier>, RepositoryError> {
        match self {
            Self::Postgres(store) => store.delete_by_id(id).await,
            Self::Memory(store) => store.delete_by_id(id).await,
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }
}

/// Build the store selected by configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the `PostgreSQL` pool cannot be created.
pub async fn connect(config: &StoreConfig) -> Result<AnyCashierStore, sqlx::Error> {
    match config {
        StoreConfig::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(AnyCashierStore::Postgres(PgCashierRepository::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory cashier store; records are lost on restart");
            Ok(AnyCashierStore::Memory(MemoryCashierStore::new()))
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
