//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::UserApi;
use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserApi>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserApi>, config: GatewayConfig) -> Self {
        Self { users, config }
    }
}
