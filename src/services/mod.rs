//! Services Layer
//!
//! Business logic between the REST handlers and the Graph API transport.
//!
//! # Architecture
//!
//! ```text
//! Dashboard --> REST API --> AdsService --> AdsTransport --> Meta Graph API
//!                                 |
//!                                 └──> normalize / summarize
//! ```
//!
//! # Services
//!
//! - `AdsService` - Fetch, flatten and aggregate ads

pub mod ads_service;

pub use ads_service::{AdsResult, AdsService, SummaryResult};
