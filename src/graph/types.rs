//! Graph API payload types
//!
//! The ads edge nests creatives and insights as `{ "data": [ ... ] }` lists
//! holding at most one element. They are deserialized straight into
//! `Option<T>` so an ad without activity is simply `None`.

use crate::error::{AppError, Result, UpstreamError};
use crate::graph::coerce::lenient;
use serde::{Deserialize, Deserializer};

/// Response body of `GET /act_{id}/ads`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphResponse {
    #[serde(default)]
    pub data: Option<Vec<RawAdEntity>>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

impl GraphResponse {
    /// Ads in the response, or the upstream error when one was reported
    pub fn into_ads(self) -> Result<Vec<RawAdEntity>> {
        if let Some(error) = self.error {
            return Err(AppError::UpstreamApi(error));
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// One ad as returned by the platform
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAdEntity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub effective_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "adcreatives", deserialize_with = "first_of_edge")]
    pub creative: Option<RawCreative>,
    #[serde(default, deserialize_with = "first_of_edge")]
    pub insights: Option<RawInsights>,
}

/// Creative attached to an ad
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCreative {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Period-aggregated insights for an ad; every metric defaults to zero
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawInsights {
    #[serde(default, deserialize_with = "lenient")]
    pub reach: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub impressions: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub clicks: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub cpc: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub ctr: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub frequency: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub cost_per_unique_click: f64,
}

/// Take the first element of a `{ "data": [...] }` edge, if any
fn first_of_edge<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Edge<T> {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    }

    let edge = Option::<Edge<T>>::deserialize(deserializer)?;
    Ok(edge.and_then(|e| e.data.into_iter().next()))
}
