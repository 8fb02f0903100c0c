//! Graph API HTTP client

use crate::config::GraphApiConfig;
use crate::error::{AppError, Result};
use crate::graph::{AdsRequest, AdsTransport, GraphResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// `reqwest`-backed transport for the ads edge
pub struct GraphApiClient {
    client: Client,
    base_url: Url,
    api_version: String,
}

impl GraphApiClient {
    pub fn new(config: &GraphApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::Configuration(format!("Invalid Graph API base URL {:?}: {}", config.base_url, e))
        })?;

        Ok(Self {
            client,
            base_url,
            api_version: config.api_version.trim_matches('/').to_string(),
        })
    }

    /// Endpoint for the ads edge of an account; a leading `act_` is accepted
    pub fn ads_url(&self, ad_account_id: &str) -> Result<Url> {
        let account = ad_account_id.trim().trim_start_matches("act_");
        self.base_url
            .join(&format!("{}/act_{}/ads", self.api_version, account))
            .map_err(|e| AppError::Configuration(format!("Invalid ad account id {:?}: {}", ad_account_id, e)))
    }
}

#[async_trait]
impl AdsTransport for GraphApiClient {
    async fn fetch_ads(&self, request: &AdsRequest) -> Result<GraphResponse> {
        let url = self.ads_url(&request.credentials.ad_account_id)?;
        let fields = request.fields();
        let limit = request.limit.to_string();

        info!("Requesting ads from {}", url);

        // The token rides in the query string, so errors are stripped of their URL.
        let response = self
            .client
            .get(url)
            .query(&[
                ("fields", fields.as_str()),
                ("access_token", request.credentials.access_token.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.without_url()))?;

        debug!("Graph API responded with {} ({} bytes)", status, body.len());

        // Error bodies come back with non-2xx statuses and are parsed all the same.
        Ok(serde_json::from_slice(&body)?)
    }
}
