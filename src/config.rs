//! Runtime configuration
//!
//! Everything is read once at startup from the process environment (a `.env`
//! file is loaded first when present) and then passed around as a plain value.

use crate::error::{AppError, Result};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_ACCESS_TOKEN: &str = "META_ACCESS_TOKEN";
pub const ENV_AD_ACCOUNT_ID: &str = "META_AD_ACCOUNT_ID";

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_API_VERSION: &str = "v18.0";
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
const DEFAULT_LOOKBACK_MONTHS: u32 = 36;
const DEFAULT_ADS_LIMIT: u32 = 500;

/// Access token and ad account the proxy queries on behalf of
#[derive(Clone, PartialEq, Eq)]
pub struct MetaCredentials {
    pub access_token: String,
    pub ad_account_id: String,
}

impl fmt::Debug for MetaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaCredentials")
            .field("access_token", &"<redacted>")
            .field("ad_account_id", &self.ad_account_id)
            .finish()
    }
}

/// Upstream Graph API settings
#[derive(Debug, Clone)]
pub struct GraphApiConfig {
    pub base_url: String,
    pub api_version: String,
    /// Maximum number of ads requested in the single outbound call
    pub ads_limit: u32,
    /// Months covered by the default (full-history) query
    pub lookback_months: u32,
    /// No timeout unless explicitly configured
    pub request_timeout: Option<Duration>,
}

impl Default for GraphApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            ads_limit: DEFAULT_ADS_LIMIT,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            request_timeout: None,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    access_token: Option<String>,
    ad_account_id: Option<String>,
    pub graph: GraphApiConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("ad_account_id", &self.ad_account_id)
            .field("graph", &self.graph)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            access_token: None,
            ad_account_id: None,
            graph: GraphApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let graph = GraphApiConfig {
            base_url: lookup("META_GRAPH_BASE_URL").unwrap_or(defaults.graph.base_url),
            api_version: lookup("META_API_VERSION").unwrap_or(defaults.graph.api_version),
            ads_limit: parse_var(&lookup, "META_ADS_LIMIT")?.unwrap_or(defaults.graph.ads_limit),
            lookback_months: parse_var(&lookup, "META_LOOKBACK_MONTHS")?
                .unwrap_or(defaults.graph.lookback_months),
            request_timeout: parse_var::<u64, _>(&lookup, "META_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            access_token: lookup(ENV_ACCESS_TOKEN),
            ad_account_id: lookup(ENV_AD_ACCOUNT_ID),
            graph,
        })
    }

    /// Replace the stored credentials
    pub fn with_credentials(mut self, access_token: &str, ad_account_id: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self.ad_account_id = Some(ad_account_id.to_string());
        self
    }

    /// Credentials, or a configuration error when either value is missing or empty
    pub fn credentials(&self) -> Result<MetaCredentials> {
        match (non_empty(&self.access_token), non_empty(&self.ad_account_id)) {
            (Some(access_token), Some(ad_account_id)) => Ok(MetaCredentials {
                access_token: access_token.to_string(),
                ad_account_id: ad_account_id.to_string(),
            }),
            _ => Err(AppError::Configuration(format!(
                "Please set {} and {} in the environment",
                ENV_ACCESS_TOKEN, ENV_AD_ACCOUNT_ID
            ))),
        }
    }

    pub fn has_access_token(&self) -> bool {
        non_empty(&self.access_token).is_some()
    }

    pub fn has_ad_account_id(&self) -> bool {
        non_empty(&self.ad_account_id).is_some()
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    /// Address the HTTP server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid address {}:{}: {}", self.host, self.port, e)))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Configuration(format!("Invalid value for {}: {}", name, e))),
    }
}
