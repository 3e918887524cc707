use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use portfolio_core::Config;
use portfolio_relay::{serve, RelayState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::load()?.with_env_overrides();
    let addr: SocketAddr = config
        .relay_addr()
        .parse()
        .with_context(|| format!("invalid relay address {}", config.relay_addr()))?;

    let state = Arc::new(RelayState::from_config(&config)?);

    serve(addr, state, async {
        tokio::signal::ctrl_c().await.ok();
    })
    .await
}
