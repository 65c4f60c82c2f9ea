//! Application state.

use std::sync::Arc;

use teller_store::RocksStore;

use crate::config::ServiceConfig;
use crate::services::{AccountService, TransactionService};

/// Application state shared across handlers.
pub struct AppState {
    /// Account lifecycle operations.
    pub accounts: AccountService<RocksStore>,

    /// Balance use/cancel processing.
    pub transactions: TransactionService<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state over the given store.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&store)),
            transactions: TransactionService::new(store),
            config,
        }
    }
}
