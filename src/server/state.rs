//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::relay::{ProviderError, RelayConfig, RelayService};

/// Shared application state.
pub struct AppState {
    /// Relay service forwarding chat requests upstream.
    pub relay: RelayService,
}

impl AppState {
    /// Create application state from the process environment.
    ///
    /// # Errors
    /// Returns an error if the relay service cannot be created.
    pub fn new() -> Result<Arc<Self>, ProviderError> {
        Self::with_config(RelayConfig::from_env())
    }

    /// Create application state from an explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the relay service cannot be created.
    pub fn with_config(config: RelayConfig) -> Result<Arc<Self>, ProviderError> {
        let relay = RelayService::new(config)?;
        Ok(Arc::new(Self { relay }))
    }
}
