//! Conference API server
//!
//! Reads `CONFERENCE_API_CONFIG` (a YAML file) if set, seeds the state
//! reference data and serves the API until Ctrl+C or SIGTERM.

use anyhow::Result;
use conference::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::in_memory(RoutePaths::new(config.links.base_path.clone()));
    state.seed_states(&config.states).await?;

    ServerBuilder::new()
        .with_state(state)
        .with_base_path(config.links.base_path.clone())
        .serve(&config.server.bind_address())
        .await
}
