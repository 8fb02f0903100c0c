//! Application state management

use crate::config::AppConfig;
use crate::graph::AdsTransport;
use crate::services::AdsService;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Immutable after startup; requests share nothing mutable.
pub struct AppState {
    /// Ads service holding the configuration and upstream transport
    pub ads: AdsService,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, transport: Arc<dyn AdsTransport>) -> Self {
        Self {
            ads: AdsService::new(config, transport),
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.ads.config()
    }
}
