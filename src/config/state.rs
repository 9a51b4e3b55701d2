// Application state module

use super::types::Config;
use crate::store::Store;

/// Shared application state.
///
/// Holds the loaded configuration and the store handle; request handlers
/// keep no other state between requests.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub const fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }
}
