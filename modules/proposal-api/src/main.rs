use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use proposal_api::{build_router, AppState};
use proposal_common::Config;
use proposal_core::log_filter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .init();

    let config = Config::from_env()?;
    config.log_redacted();

    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Proposal API starting on {addr}");
    info!(static_dir = %config.static_dir.display(), "Serving front end");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
