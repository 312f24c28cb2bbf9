//! Application state management

use void_wallet::AccountService;

use crate::config::ApiConfig;

/// Application state shared across HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Account operations
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            accounts: AccountService::new(config.account_config()),
        }
    }
}
