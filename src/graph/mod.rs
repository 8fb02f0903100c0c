//! Meta Graph API access
//!
//! [`AdsTransport`] is the seam between the ads service and the network.
//! [`GraphApiClient`] talks to the real API over HTTP; tests swap in fakes.

pub mod client;
pub mod coerce;
pub mod types;

use crate::ads::types::DateRange;
use crate::config::MetaCredentials;
use crate::error::Result;
use async_trait::async_trait;

pub use client::GraphApiClient;
pub use types::{GraphResponse, RawAdEntity, RawCreative, RawInsights};

/// Transport for the single outbound ads query
#[async_trait]
pub trait AdsTransport: Send + Sync {
    /// Issue one request for the ads described by `request`
    async fn fetch_ads(&self, request: &AdsRequest) -> Result<GraphResponse>;
}

/// Which fields are requested from the ads edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// Used by the default (lookback) query
    Full,
    /// Used by the custom-range query
    Compact,
}

impl FieldSet {
    /// Build the `fields` parameter with insights scoped to `range`
    pub fn fields(&self, range: &DateRange) -> String {
        let time_range = format!(
            "time_range({{'since':'{}','until':'{}'}})",
            range.since_str(),
            range.until_str()
        );

        match self {
            FieldSet::Full => format!(
                "name,effective_status,status,adcreatives{{image_url,title,body}},\
                 insights.{}{{reach,impressions,clicks,spend,cpc,ctr,frequency,cost_per_unique_click}}",
                time_range
            ),
            FieldSet::Compact => format!(
                "name,effective_status,adcreatives{{image_url}},\
                 insights.{}{{reach,impressions,clicks,spend,cpc,ctr}}",
                time_range
            ),
        }
    }
}

/// Everything needed to issue one ads query
#[derive(Debug, Clone)]
pub struct AdsRequest {
    pub credentials: MetaCredentials,
    pub date_range: DateRange,
    pub field_set: FieldSet,
    pub limit: u32,
}

impl AdsRequest {
    pub fn fields(&self) -> String {
        self.field_set.fields(&self.date_range)
    }
}
