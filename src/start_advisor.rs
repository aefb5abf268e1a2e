//! Startup helpers for the advisory relay server.

use std::process::ExitCode;

use crate::relay::RelayConfig;
use crate::server::{self, AppState};

/// Run the server (used by the `cadastre-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Cadastre Advisory relay v{}", env!("CARGO_PKG_VERSION"));

    let config = RelayConfig::from_env();
    tracing::info!(
        "Upstream provider: {} (model {})",
        config.provider.name(),
        config.model
    );
    if config.api_key.is_none() {
        tracing::warn!(
            "{} is not set; relay requests will fail until it is configured",
            config.provider.api_key_env()
        );
    }

    let state = match AppState::with_config(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var("CADASTRE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}
