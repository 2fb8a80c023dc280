//! GitHub billing API client and payload types.

mod client;
pub mod types;

pub use client::{ApiClient, PremiumUsageQuery, UsageSummaryQuery, DEFAULT_BASE_URL};
