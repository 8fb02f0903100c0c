//! Meta Ads Dashboard - ad performance proxy
//!
//! Queries the Meta Graph API for the ads of one ad account, flattens the
//! nested insights payload into uniform records, and serves them together
//! with aggregated KPIs over a small JSON API.

pub mod ads;
pub mod api;
pub mod config;
pub mod error;
pub mod graph;
pub mod services;
pub mod state;

use api::ApiServer;
use config::AppConfig;
use graph::GraphApiClient;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging, load configuration and serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meta_ads_dashboard=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Meta Ads Dashboard...");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;

    tracing::info!("META_ACCESS_TOKEN configured: {}", config.has_access_token());
    tracing::info!("META_AD_ACCOUNT_ID configured: {}", config.has_ad_account_id());
    tracing::info!(
        "Default date range: last {} months",
        config.graph.lookback_months
    );

    let transport = Arc::new(GraphApiClient::new(&config.graph)?);
    let state = Arc::new(AppState::new(config, transport));

    let mut server = ApiServer::new(state);
    server.start(addr).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    server.stop();
    server.wait().await;
    Ok(())
}
