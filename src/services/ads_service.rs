//! Ads Service
//!
//! Fetches ads for the configured account and flattens them.
//! Called by the REST handlers; holds no state between calls.

use crate::ads::summary::{summarize, AdsSummary, DataCoverage};
use crate::ads::types::{DateRange, NormalizedAdRecord};
use crate::ads::normalize::normalize_ads;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::graph::{AdsRequest, AdsTransport, FieldSet};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// Result of an ads query
#[derive(Debug, Clone)]
pub struct AdsResult {
    pub records: Vec<NormalizedAdRecord>,
    pub date_range: DateRange,
    pub coverage: DataCoverage,
}

/// Result of a summary query
#[derive(Debug, Clone)]
pub struct SummaryResult {
    pub summary: AdsSummary,
    pub date_range: DateRange,
}

/// Ads service for business logic
pub struct AdsService {
    config: AppConfig,
    transport: Arc<dyn AdsTransport>,
}

impl AdsService {
    pub fn new(config: AppConfig, transport: Arc<dyn AdsTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Human-readable label of the default window, e.g. "Last 36 months"
    pub fn lookback_label(&self) -> String {
        format!("Last {} months", self.config.graph.lookback_months)
    }

    /// Ads over the default lookback window ending today (UTC)
    pub async fn get_ads(&self) -> Result<AdsResult> {
        self.get_ads_as_of(Utc::now().date_naive()).await
    }

    /// Ads over the default lookback window ending `today`
    pub async fn get_ads_as_of(&self, today: NaiveDate) -> Result<AdsResult> {
        info!("AdsService::get_ads");

        let credentials = self.config.credentials()?;
        let date_range = DateRange::lookback(today, self.config.graph.lookback_months);

        info!(
            "Date range: {} to {} ({})",
            date_range.since_str(),
            date_range.until_str(),
            self.lookback_label()
        );

        let records = self
            .fetch(AdsRequest {
                credentials,
                date_range,
                field_set: FieldSet::Full,
                limit: self.config.graph.ads_limit,
            })
            .await?;

        let coverage = DataCoverage::from_records(&records);
        info!("Ads with data: {}", coverage.with_data);
        info!("Ads without data: {}", coverage.without_data);

        Ok(AdsResult {
            records,
            date_range,
            coverage,
        })
    }

    /// Ads over an explicit `since`/`until` window
    pub async fn get_ads_in_range(
        &self,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<AdsResult> {
        info!("AdsService::get_ads_in_range");

        let credentials = self.config.credentials()?;
        let date_range = DateRange::parse(since, until)?;

        let records = self
            .fetch(AdsRequest {
                credentials,
                date_range,
                field_set: FieldSet::Compact,
                limit: self.config.graph.ads_limit,
            })
            .await?;

        let coverage = DataCoverage::from_records(&records);
        Ok(AdsResult {
            records,
            date_range,
            coverage,
        })
    }

    /// KPI summary; the explicit range is used when either bound is given
    pub async fn get_summary(
        &self,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<SummaryResult> {
        let result = if since.is_some() || until.is_some() {
            self.get_ads_in_range(since, until).await?
        } else {
            self.get_ads().await?
        };

        let summary = summarize(&result.records).ok_or_else(|| {
            AppError::NoData(
                "The account returned no ads. Check META_AD_ACCOUNT_ID and the token's permissions."
                    .to_string(),
            )
        })?;

        Ok(SummaryResult {
            summary,
            date_range: result.date_range,
        })
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    async fn fetch(&self, request: AdsRequest) -> Result<Vec<NormalizedAdRecord>> {
        info!("Requesting ads from Meta API");

        let ads = self.transport.fetch_ads(&request).await?.into_ads()?;
        info!("Ads found: {}", ads.len());

        Ok(normalize_ads(ads))
    }
}
