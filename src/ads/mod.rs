//! Ad records and their aggregation
//!
//! Raw Graph API ads are flattened by [`normalize`] and rolled up by
//! [`summary`]. Nothing here touches the network.

pub mod normalize;
pub mod summary;
pub mod types;

pub use normalize::{normalize_ad, normalize_ads};
pub use summary::{summarize, AdsSummary, AggregateTotals, DataCoverage, StatusBuckets};
pub use types::{CompactAdRecord, DateRange, NormalizedAdRecord};
