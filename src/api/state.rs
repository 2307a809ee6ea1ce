//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{AccountStore, Cache, Database};
use crate::services::{AccountManager, AccountService, TokenIssuer};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Account service
    pub account_service: Arc<dyn AccountService>,
    /// Redis cache (rate limiter backend)
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from infrastructure and configuration.
    ///
    /// Wires the repository, token issuer and account service together with
    /// explicit references; there is no ambient service lookup.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: &Config) -> Self {
        let repo = Arc::new(AccountStore::new(database.get_connection()));
        let issuer = TokenIssuer::from_config(config);
        let account_service = Arc::new(AccountManager::new(repo, issuer, config.hash_cost));

        Self {
            account_service,
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            account_service,
            cache,
            database,
        }
    }
}
