//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::AnyCashierStore;
use crate::services::CashierService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cashier store is built
/// once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cashiers: CashierService<AnyCashierStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Admin configuration, read for the username domain
    /// * `store` - The cashier store selected by `config.store`
    #[must_use]
    pub fn new(config: &AdminConfig, store: AnyCashierStore) -> Self {
        let cashiers = CashierService::new(store, config.user_name_domain.clone());
        Self {
            inner: Arc::new(AppStateInner { cashiers }),
        }
    }

    /// Get a reference to the cashier service.
    #[must_use]
    pub fn cashiers(&self) -> &CashierService<AnyCashierStore> {
        &self.inner.cashiers
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
impl AppState {
    /// State backed by a fresh in-memory store and default settings.
    pub(crate) fn for_tests() -> Self {
        let config =
            AdminConfig::from_vars(&|key| (key == "CASHIER_STORE").then(|| "memory".to_string()))
                .unwrap();
        Self::new(
            &config,
            AnyCashierStore::Memory(crate::db::MemoryCashierStore::new()),
        )
    }
}
