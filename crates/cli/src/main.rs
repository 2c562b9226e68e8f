//! Nature CLI - Database migrations and cashier management.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! nature-cli migrate
//!
//! # Register a cashier and print the generated credentials
//! nature-cli cashier add -n "Jane Doe" -m 9876543210 -a 123456789012 \
//!     -s Pune --address "12 MG Road" -e jane@example.com
//!
//! # List and remove cashiers
//! nature-cli cashier list
//! nature-cli cashier delete 3
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `cashier add|list|delete` - Manage cashiers through the same service as the server

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nature-cli")]
#[command(author, version, about = "Nature back-office CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Manage cashiers
    Cashier {
        #[command(subcommand)]
        action: CashierAction,
    },
}

#[derive(Subcommand)]
enum CashierAction {
    /// Register a cashier and print the generated username and password
    Add {
        /// Cashier display name
        #[arg(short, long)]
        name: String,

        /// 10-digit mobile number
        #[arg(short, long)]
        mobile: String,

        /// 12-digit Aadhaar number
        #[arg(short, long)]
        aadhaar: String,

        /// Store the cashier works at
        #[arg(short, long)]
        store_location: String,

        /// Postal address
        #[arg(long)]
        address: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// List all cashiers
    List,
    /// Delete a cashier by ID
    Delete {
        /// Cashier ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::admin().await?,
        Commands::Cashier { action } => match action {
            CashierAction::Add {
                name,
                mobile,
                aadhaar,
                store_location,
                address,
                email,
            } => {
                let input = nature_core::CashierInput {
                    cashier_name: Some(name),
                    mobile: Some(mobile),
                    aadhaar: Some(aadhaar),
                    store_location: Some(store_location),
                    address: Some(address),
                    email: Some(email),
                };
                commands::cashier::add(&input).await?;
            }
            CashierAction::List => commands::cashier::list().await?,
            CashierAction::Delete { id } => commands::cashier::delete(&id).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cashier_add() {
        let cli = Cli::try_parse_from([
            "nature-cli",
            "cashier",
            "add",
            "-n",
            "Jane Doe",
            "-m",
            "9876543210",
            "-a",
            "123456789012",
            "-s",
            "Pune",
            "--address",
            "12 MG Road",
            "-e",
            "jane@example.com",
        ]);
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Cashier {
                    action: CashierAction::Add { .. }
                }
            })
        ));
    }

    #[test]
    fn test_parse_cashier_delete_requires_id() {
        assert!(Cli::try_parse_from(["nature-cli", "cashier", "delete"]).is_err());
    }
}
