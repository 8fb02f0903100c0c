//! REST API endpoint handlers

use crate::ads::types::{CompactAdRecord, NormalizedAdRecord};
use crate::error::Result;
use crate::api::types::*;
use crate::state::AppState;
use axum::extract::{Json, Query, State};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET /api/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        env_configured: state.config().is_configured(),
    })
}

// ============================================================================
// Ads
// ============================================================================

/// Ads over the default lookback window - GET /api/meta-ads
pub async fn get_ads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdsResponse<NormalizedAdRecord>>> {
    let result = state.ads.get_ads().await?;

    let stats = AdsStats {
        with_data: result.coverage.with_data,
        without_data: result.coverage.without_data,
        date_range: DateRangeInfo::new(&result.date_range).with_period(state.ads.lookback_label()),
    };

    Ok(Json(AdsResponse::new(result.records).with_stats(stats)))
}

/// Ads over an explicit window - GET /api/meta-ads/custom-range?since=&until=
pub async fn get_ads_custom_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<AdsResponse<CompactAdRecord>>> {
    let result = state
        .ads
        .get_ads_in_range(query.since.as_deref(), query.until.as_deref())
        .await?;

    info!(
        "Custom range {} to {}: {} ads",
        result.date_range.since_str(),
        result.date_range.until_str(),
        result.records.len()
    );

    let records: Vec<CompactAdRecord> = result.records.into_iter().map(Into::into).collect();
    Ok(Json(
        AdsResponse::new(records).with_date_range(DateRangeInfo::new(&result.date_range)),
    ))
}

/// KPI summary - GET /api/meta-ads/summary[?since=&until=]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<SummaryResponse>> {
    let result = state
        .ads
        .get_summary(query.since.as_deref(), query.until.as_deref())
        .await?;

    let summary = result.summary;
    Ok(Json(SummaryResponse {
        success: true,
        total: summary.total,
        totals: summary.totals,
        statuses: summary.statuses,
        coverage: summary.coverage,
        date_range: DateRangeInfo::new(&result.date_range),
    }))
}
