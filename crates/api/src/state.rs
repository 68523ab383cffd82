use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::account::AccountLifecycle;
use crate::services::checkout::CheckoutOrchestrator;
use crate::services::ledger::CreditLedger;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kredit_db::DbPool,
    /// Server configuration (JWT secrets are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Per-tenor credit limits.
    pub ledger: Arc<CreditLedger>,
    /// Signup, signin, signout, refresh.
    pub accounts: Arc<AccountLifecycle>,
    /// Limit-checked transaction creation.
    pub checkout: Arc<CheckoutOrchestrator>,
}

impl AppState {
    /// Wire the services from a pool and a loaded configuration.
    pub fn new(pool: kredit_db::DbPool, config: ServerConfig) -> Self {
        let ledger = Arc::new(CreditLedger::new(config.tenor_limits.clone()));
        let accounts = Arc::new(AccountLifecycle::new(
            pool.clone(),
            config.jwt.clone(),
            Arc::clone(&ledger),
        ));
        let checkout = Arc::new(CheckoutOrchestrator::new(pool.clone(), Arc::clone(&ledger)));

        Self {
            pool,
            config: Arc::new(config),
            ledger,
            accounts,
            checkout,
        }
    }
}
