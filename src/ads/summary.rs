//! KPI aggregation over normalized ads

use crate::ads::types::NormalizedAdRecord;
use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_PAUSED: &str = "PAUSED";

/// Sums across all ads plus the derived average cost per click
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub reach: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub spend: f64,
    /// `spend / clicks`, or 0 when there were no clicks
    pub avg_cpc: f64,
}

/// Ads counted by effective status; the three buckets partition the set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBuckets {
    pub active: usize,
    pub paused: usize,
    pub other: usize,
}

impl StatusBuckets {
    pub fn total(&self) -> usize {
        self.active + self.paused + self.other
    }

    fn add(&mut self, effective_status: Option<&str>) {
        match effective_status {
            Some(STATUS_ACTIVE) => self.active += 1,
            Some(STATUS_PAUSED) => self.paused += 1,
            _ => self.other += 1,
        }
    }
}

/// Ads with and without delivery in the period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCoverage {
    pub with_data: usize,
    pub without_data: usize,
}

impl DataCoverage {
    pub fn from_records(records: &[NormalizedAdRecord]) -> Self {
        let mut coverage = Self::default();
        for record in records {
            coverage.add(record);
        }
        coverage
    }

    pub fn add(&mut self, record: &NormalizedAdRecord) {
        if record.has_data() {
            self.with_data += 1;
        } else {
            self.without_data += 1;
        }
    }
}

/// Everything the dashboard's KPI cards show
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdsSummary {
    pub total: usize,
    pub totals: AggregateTotals,
    pub statuses: StatusBuckets,
    pub coverage: DataCoverage,
}

/// Aggregate `records` in a single pass
///
/// Returns `None` when there is nothing to aggregate, leaving the caller to
/// decide between an empty state and an error.
pub fn summarize(records: &[NormalizedAdRecord]) -> Option<AdsSummary> {
    if records.is_empty() {
        return None;
    }

    let mut totals = AggregateTotals::default();
    let mut statuses = StatusBuckets::default();
    let mut coverage = DataCoverage::default();

    for record in records {
        totals.reach = totals.reach.saturating_add(record.reach);
        totals.impressions = totals.impressions.saturating_add(record.impressions);
        totals.clicks = totals.clicks.saturating_add(record.clicks);
        totals.spend = clamp_finite(totals.spend + record.spend);

        statuses.add(record.effective_status.as_deref());
        coverage.add(record);
    }

    totals.avg_cpc = average_cpc(totals.spend, totals.clicks);

    Some(AdsSummary {
        total: records.len(),
        totals,
        statuses,
        coverage,
    })
}

/// Spend per click; zero (never NaN or infinite) when there are no clicks
pub fn average_cpc(spend: f64, clicks: i64) -> f64 {
    if clicks > 0 {
        clamp_finite(spend / clicks as f64)
    } else {
        0.0
    }
}

/// Sums saturate at the largest representable amount instead of going infinite
fn clamp_finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value.is_infinite() {
        f64::MAX.copysign(value)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::types::UNNAMED_AD;

    fn record(status: Option<&str>, clicks: i64, spend: f64) -> NormalizedAdRecord {
        NormalizedAdRecord {
            ad_id: None,
            ad_name: UNNAMED_AD.to_string(),
            effective_status: status.map(str::to_string),
            status: None,
            image_url: None,
            title: None,
            body: None,
            reach: 0,
            impressions: 0,
            clicks,
            spend,
            cpc: 0.0,
            ctr: 0.0,
            frequency: 0.0,
            cost_per_unique_click: 0.0,
        }
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_avg_cpc_example() {
        let records = vec![record(Some("ACTIVE"), 0, 10.0), record(Some("PAUSED"), 5, 20.0)];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.totals.spend, 30.0);
        assert_eq!(summary.totals.clicks, 5);
        assert_eq!(summary.totals.avg_cpc, 6.0);
        assert_eq!(format!("{:.2}", summary.totals.avg_cpc), "6.00");
    }

    #[test]
    fn test_avg_cpc_zero_without_clicks() {
        let records = vec![record(None, 0, 99.0)];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.totals.avg_cpc, 0.0);
        assert!(summary.totals.avg_cpc.is_finite());
        assert_eq!(average_cpc(0.0, 0), 0.0);
    }

    #[test]
    fn test_status_buckets_partition() {
        let records = vec![
            record(Some("ACTIVE"), 1, 1.0),
            record(Some("ACTIVE"), 1, 1.0),
            record(Some("PAUSED"), 1, 1.0),
            record(Some("ARCHIVED"), 1, 1.0),
            record(Some("active"), 1, 1.0),
            record(None, 1, 1.0),
        ];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.statuses.active, 2);
        assert_eq!(summary.statuses.paused, 1);
        assert_eq!(summary.statuses.other, 3);
        assert_eq!(summary.statuses.total(), records.len());
        assert_eq!(summary.total, records.len());
    }

    #[test]
    fn test_sums_and_coverage() {
        let mut a = record(Some("ACTIVE"), 10, 25.5);
        a.reach = 100;
        a.impressions = 500;
        let mut b = record(Some("ACTIVE"), 2, 0.0);
        b.reach = 7;
        b.impressions = 40;
        let c = record(Some("PAUSED"), 0, 0.0);

        let records = vec![a, b, c];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.totals.reach, 107);
        assert_eq!(summary.totals.impressions, 540);
        assert_eq!(summary.totals.clicks, 12);
        assert_eq!(summary.totals.spend, 25.5);
        assert_eq!(summary.totals.avg_cpc, 25.5 / 12.0);
        assert_eq!(summary.coverage.with_data, 2);
        assert_eq!(summary.coverage.without_data, 1);
        assert_eq!(summary.coverage, DataCoverage::from_records(&records));
    }

    #[test]
    fn test_count_sums_saturate() {
        let raw: Vec<crate::graph::RawAdEntity> = serde_json::from_value(serde_json::json!([
            {"insights": {"data": [{"reach": "1e30", "impressions": "1e30", "clicks": "1e30"}]}},
            {"insights": {"data": [{"reach": "1e30", "impressions": "1e30", "clicks": "1e30"}]}}
        ]))
        .unwrap();
        let records = crate::ads::normalize_ads(raw);
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.totals.reach, i64::MAX);
        assert_eq!(summary.totals.impressions, i64::MAX);
        assert_eq!(summary.totals.clicks, i64::MAX);
        assert!(summary.totals.avg_cpc >= 0.0);
    }

    #[test]
    fn test_spend_sum_stays_finite() {
        let records = vec![record(Some("ACTIVE"), 1, 1e308), record(Some("ACTIVE"), 1, 1e308)];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.totals.spend, f64::MAX);
        assert!(summary.totals.avg_cpc.is_finite());
        assert!(summary.totals.avg_cpc > 0.0);

        let json = serde_json::to_value(summary.totals).unwrap();
        assert!(json["spend"].is_number());
        assert!(json["avg_cpc"].is_number());
    }

    #[test]
    fn test_coverage_add_matches_from_records() {
        let records = vec![record(None, 0, 5.0), record(None, 0, 0.0)];
        let mut coverage = DataCoverage::default();
        coverage.add(&records[0]);
        coverage.add(&records[1]);

        assert_eq!(coverage, DataCoverage { with_data: 1, without_data: 1 });
        assert_eq!(coverage, DataCoverage::from_records(&records));
    }
}
