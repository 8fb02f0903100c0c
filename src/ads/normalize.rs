//! Flattening of raw Graph API ads into [`NormalizedAdRecord`]s

use crate::ads::types::{NormalizedAdRecord, UNNAMED_AD};
use crate::graph::{RawAdEntity, RawInsights};
use tracing::debug;

/// Flatten one ad, defaulting every absent field
pub fn normalize_ad(raw: RawAdEntity) -> NormalizedAdRecord {
    let ad_name = non_empty(raw.name).unwrap_or_else(|| UNNAMED_AD.to_string());

    if raw.insights.is_none() {
        debug!(
            "Ad without insights: {} ({})",
            ad_name,
            raw.effective_status.as_deref().unwrap_or("unknown status")
        );
    }

    let insights = raw.insights.unwrap_or_default();
    let creative = raw.creative.unwrap_or_default();

    let RawInsights {
        reach,
        impressions,
        clicks,
        spend,
        cpc,
        ctr,
        frequency,
        cost_per_unique_click,
    } = insights;

    NormalizedAdRecord {
        ad_id: non_empty(raw.id),
        ad_name,
        effective_status: raw.effective_status,
        status: raw.status,
        image_url: non_empty(creative.image_url),
        title: non_empty(creative.title),
        body: non_empty(creative.body),
        reach,
        impressions,
        clicks,
        spend,
        cpc,
        ctr,
        frequency,
        cost_per_unique_click,
    }
}

/// Flatten every ad of a response, preserving order
pub fn normalize_ads(raw: Vec<RawAdEntity>) -> Vec<NormalizedAdRecord> {
    raw.into_iter().map(normalize_ad).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawAdEntity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_promo_example() {
        let record = normalize_ad(raw(json!({
            "name": "Promo A",
            "effective_status": "ACTIVE",
            "insights": {"data": [{"reach": "100", "impressions": "500", "clicks": "10",
                                   "spend": "25.50", "cpc": "2.55"}]}
        })));

        assert_eq!(record.ad_name, "Promo A");
        assert_eq!(record.effective_status.as_deref(), Some("ACTIVE"));
        assert_eq!(record.reach, 100);
        assert_eq!(record.impressions, 500);
        assert_eq!(record.clicks, 10);
        assert_eq!(record.spend, 25.50);
        assert_eq!(record.cpc, 2.55);
        assert_eq!(record.ctr, 0.0);
        assert_eq!(record.frequency, 0.0);
        assert_eq!(record.cost_per_unique_click, 0.0);
        assert!(record.status.is_none());
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_empty_entity_gets_defaults() {
        let record = normalize_ad(RawAdEntity::default());

        assert_eq!(record.ad_name, UNNAMED_AD);
        assert!(record.effective_status.is_none());
        assert_eq!(record.reach, 0);
        assert_eq!(record.impressions, 0);
        assert_eq!(record.clicks, 0);
        assert_eq!(record.spend, 0.0);
        assert!(!record.has_data());
    }

    #[test]
    fn test_numeric_fields_always_present_in_json() {
        let record = normalize_ad(raw(json!({
            "name": "",
            "insights": {"data": [{"reach": null, "spend": "oops", "ctr": "1.5"}]}
        })));
        assert_eq!(record.ad_name, UNNAMED_AD);

        let json = serde_json::to_value(&record).unwrap();
        for field in [
            "reach",
            "impressions",
            "clicks",
            "spend",
            "cpc",
            "ctr",
            "frequency",
            "cost_per_unique_click",
        ] {
            assert!(json[field].is_number(), "{} should be a number", field);
        }
        assert_eq!(json["ctr"], 1.5);
        assert_eq!(json["spend"], 0.0);
    }

    #[test]
    fn test_creative_fields() {
        let record = normalize_ad(raw(json!({
            "name": "Creative",
            "status": "PAUSED",
            "adcreatives": {"data": [{"image_url": "https://cdn/a.jpg", "title": "", "body": "Buy now"}]}
        })));

        assert_eq!(record.image_url.as_deref(), Some("https://cdn/a.jpg"));
        assert!(record.title.is_none());
        assert_eq!(record.body.as_deref(), Some("Buy now"));
        assert_eq!(record.status.as_deref(), Some("PAUSED"));
    }

    #[test]
    fn test_normalize_ads_preserves_order() {
        let records = normalize_ads(vec![
            raw(json!({"name": "first"})),
            raw(json!({"name": "second"})),
        ]);
        let names: Vec<_> = records.iter().map(|r| r.ad_name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
