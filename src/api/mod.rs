//! REST API server module
//!
//! Provides the JSON endpoints the Meta Ads dashboard reads:
//! - `GET /api/health`
//! - `GET /api/meta-ads` (default lookback window, with stats)
//! - `GET /api/meta-ads/custom-range?since=YYYY-MM-DD&until=YYYY-MM-DD`
//! - `GET /api/meta-ads/summary` (KPI totals and status counts)

pub mod handlers;
mod server;
mod types;

pub use server::{build_router, ApiServer};
pub use types::{
    AdsResponse, AdsStats, DateRangeInfo, DateRangeQuery, HealthResponse, SummaryResponse,
};
