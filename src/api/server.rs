//! HTTP server for the dashboard REST API

use crate::error::{AppError, Result};
use crate::api::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all routes
pub fn build_router(state: Arc<AppState>) -> Router {
    // Build CORS layer (the dashboard may be served from another origin)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/meta-ads", get(handlers::get_ads))
        .route("/api/meta-ads/custom-range", get(handlers::get_ads_custom_range))
        .route("/api/meta-ads/summary", get(handlers::get_summary))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server manager
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Create a new server
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
            handle: None,
        }
    }

    /// Bind `addr` and start serving in the background; returns the bound address
    pub async fn start(&mut self, addr: SocketAddr) -> Result<SocketAddr> {
        let app = build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        info!("Starting Meta Ads API server on {}", local_addr);

        self.handle = Some(tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        }));

        info!("=== Endpoints ===");
        info!("  GET  http://{}/api/health", local_addr);
        info!("  GET  http://{}/api/meta-ads", local_addr);
        info!("  GET  http://{}/api/meta-ads/custom-range?since=YYYY-MM-DD&until=YYYY-MM-DD", local_addr);
        info!("  GET  http://{}/api/meta-ads/summary", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }

    /// Wait for the server task to finish
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("API server task failed: {}", e);
            }
        }
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::graph::GraphApiClient;

    #[tokio::test]
    async fn test_start_serve_and_stop() {
        let config = AppConfig::default();
        let transport = Arc::new(GraphApiClient::new(&config.graph).unwrap());
        let state = Arc::new(AppState::new(config, transport));

        let mut server = ApiServer::new(state);
        let addr = server
            .start("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        assert!(server.is_running());

        let body: serde_json::Value = reqwest::get(format!("http://{}/api/health", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["env_configured"], false);

        server.stop();
        server.wait().await;
        assert!(!server.is_running());
    }
}
