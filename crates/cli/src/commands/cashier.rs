//! Cashier management commands.
//!
//! These drive the same `CashierService` as the admin server, so validation,
//! duplicate detection and credential generation behave identically.
//!
//! # Environment Variables
//!
//! Read through `AdminConfig`: `ADMIN_DATABASE_URL` (or `DATABASE_URL`),
//! `CASHIER_STORE` and `CASHIER_USERNAME_DOMAIN`.

use secrecy::ExposeSecret;
use thiserror::Error;

use nature_admin::config::{AdminConfig, ConfigError};
use nature_admin::db::{self, AnyCashierStore};
use nature_admin::services::{CashierError, CashierService};
use nature_core::{CashierId, CashierInput};

/// Errors that can occur during cashier operations.
#[derive(Debug, Error)]
pub enum CashierCommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// The service rejected the operation.
    #[error("{0}")]
    Cashier(#[from] CashierError),

    /// Input was rejected; carries every field message.
    #[error("{summary}: {}", .details.join("; "))]
    Rejected {
        summary: String,
        details: Vec<String>,
    },

    /// The ID is not a number.
    #[error("Invalid cashier ID: {0}")]
    InvalidId(String),
}

async fn service() -> Result<CashierService<AnyCashierStore>, CashierCommandError> {
    let config = AdminConfig::from_env()?;
    let store = db::connect(&config.store).await?;
    Ok(CashierService::new(store, config.user_name_domain))
}

/// Register a cashier and print the generated credentials.
///
/// # Errors
///
/// Returns an error if input is rejected or the store fails.
pub async fn add(input: &CashierInput) -> Result<CashierId, CashierCommandError> {
    let service = service().await?;

    let added = service.add_cashier(input).await.map_err(|e| {
        if e.violations().is_empty() {
            CashierCommandError::Cashier(e)
        } else {
            CashierCommandError::Rejected {
                summary: e.to_string(),
                details: e.violations().iter().map(|v| v.message.clone()).collect(),
            }
        }
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!("Created cashier {}", added.id);
        println!("  Username: {}", added.user_name);
        println!("  Password: {}", added.password.expose_secret());
        println!("The password will not be shown again.");
    }

    Ok(added.id)
}

/// Print every cashier, one per line.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn list() -> Result<(), CashierCommandError> {
    let service = service().await?;
    let cashiers = service.list_cashiers().await?;

    #[allow(clippy::print_stdout)]
    {
        if cashiers.is_empty() {
            println!("No cashiers.");
        }
        for c in &cashiers {
            println!(
                "{:>5}  {:<24} {:<28} {}  {}  {:<16} {}",
                c.id.to_string(),
                c.cashier_name,
                c.user_name.as_str(),
                c.mobile,
                c.aadhaar,
                c.store_location,
                c.email
            );
        }
    }

    Ok(())
}

/// Delete a cashier by ID.
///
/// # Errors
///
/// Returns an error if the ID is malformed or no cashier has it.
pub async fn delete(id: &str) -> Result<(), CashierCommandError> {
    let id: CashierId = id
        .parse()
        .map_err(|_| CashierCommandError::InvalidId(id.to_owned()))?;

    let service = service().await?;
    let removed = service.delete_cashier(id).await?;

    tracing::info!(cashier_id = %id, "Cashier deleted");
    #[allow(clippy::print_stdout)]
    {
        println!("Deleted cashier {} ({})", removed.id, removed.user_name);
    }

    Ok(())
}
