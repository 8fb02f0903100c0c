//! REST API response types
//!
//! Shapes match what the dashboard front end reads.

use crate::ads::summary::{AggregateTotals, DataCoverage, StatusBuckets};
use crate::ads::types::DateRange;
use serde::{Deserialize, Serialize};

/// `since`/`until` query parameters; both optional at the extractor level
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub since: Option<String>,
    pub until: Option<String>,
}

/// Window echoed back to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DateRangeInfo {
    pub since: String,
    pub until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl DateRangeInfo {
    pub fn new(range: &DateRange) -> Self {
        Self {
            since: range.since_str(),
            until: range.until_str(),
            period: None,
        }
    }

    pub fn with_period(mut self, period: String) -> Self {
        self.period = Some(period);
        self
    }
}

/// `stats` block of the default ads response
#[derive(Debug, Clone, Serialize)]
pub struct AdsStats {
    pub with_data: usize,
    pub without_data: usize,
    pub date_range: DateRangeInfo,
}

/// Response of `GET /api/meta-ads`
#[derive(Debug, Clone, Serialize)]
pub struct AdsResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AdsStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRangeInfo>,
}

impl<T: Serialize> AdsResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
            stats: None,
            date_range: None,
        }
    }

    pub fn with_stats(mut self, stats: AdsStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_date_range(mut self, date_range: DateRangeInfo) -> Self {
        self.date_range = Some(date_range);
        self
    }
}

/// Response of `GET /api/meta-ads/summary`
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub total: usize,
    pub totals: AggregateTotals,
    pub statuses: StatusBuckets,
    pub coverage: DataCoverage,
    pub date_range: DateRangeInfo,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub env_configured: bool,
}
