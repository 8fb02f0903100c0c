//! Normalized ad types served to the dashboard

use crate::error::{AppError, Result};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Placeholder used when the platform returns an ad without a name
pub const UNNAMED_AD: &str = "Unnamed ad";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One ad flattened into a record with every metric present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAdRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    pub ad_name: String,
    pub effective_status: Option<String>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub reach: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub spend: f64,
    pub cpc: f64,
    pub ctr: f64,
    pub frequency: f64,
    pub cost_per_unique_click: f64,
}

impl NormalizedAdRecord {
    /// Whether the ad recorded any delivery in the queried period
    pub fn has_data(&self) -> bool {
        self.impressions > 0 || self.spend > 0.0
    }
}

/// Trimmed record shape returned by the custom-range endpoint
///
/// That endpoint requests fewer fields upstream (no `status`, `title`, `body`,
/// `frequency` or `cost_per_unique_click`), so they are left out here too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactAdRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    pub ad_name: String,
    pub effective_status: Option<String>,
    pub image_url: Option<String>,
    pub reach: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub spend: f64,
    pub cpc: f64,
    pub ctr: f64,
}

impl From<NormalizedAdRecord> for CompactAdRecord {
    fn from(record: NormalizedAdRecord) -> Self {
        Self {
            ad_id: record.ad_id,
            ad_name: record.ad_name,
            effective_status: record.effective_status,
            image_url: record.image_url,
            reach: record.reach,
            impressions: record.impressions,
            clicks: record.clicks,
            spend: record.spend,
            cpc: record.cpc,
            ctr: record.ctr,
        }
    }
}

/// Inclusive reporting window sent to the insights query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    /// `today` minus `months`, through `today`
    pub fn lookback(today: NaiveDate, months: u32) -> Self {
        let since = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { since, until: today }
    }

    /// Parse an explicit range from raw query values
    ///
    /// The order of the two bounds is not checked; an inverted range is sent
    /// upstream as given.
    pub fn parse(since: Option<&str>, until: Option<&str>) -> Result<Self> {
        let (since, until) = match (present(since), present(until)) {
            (Some(since), Some(until)) => (since, until),
            _ => {
                return Err(AppError::MissingParameter(
                    "Both \"since\" and \"until\" must be provided in YYYY-MM-DD format".to_string(),
                ))
            }
        };

        Ok(Self {
            since: parse_date("since", since)?,
            until: parse_date("until", until)?,
        })
    }

    pub fn since_str(&self) -> String {
        self.since.format(DATE_FORMAT).to_string()
    }

    pub fn until_str(&self) -> String {
        self.until.format(DATE_FORMAT).to_string()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        AppError::InvalidParameter(format!(
            "\"{}\" must be a calendar date in YYYY-MM-DD format, got {:?}: {}",
            name, value, e
        ))
    })
}
