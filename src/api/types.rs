//! Payload types for the GitHub billing API.
//!
//! Field names follow the camelCase wire format of the enhanced billing
//! platform. Quantities and amounts are `f64` because fractional-multiplier
//! models produce fractional premium-request counts. All quantity fields
//! default to zero so partial payloads still deserialize.

use serde::{Deserialize, Serialize};

/// Period covered by a billing response
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

/// One line item from the premium-request usage endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PremiumUsageItem {
    pub product: String,
    pub sku: String,
    pub model: String,
    pub unit_type: String,
    pub price_per_unit: f64,
    pub gross_quantity: f64,
    pub gross_amount: f64,
    pub discount_quantity: f64,
    pub discount_amount: f64,
    pub net_quantity: f64,
    pub net_amount: f64,
}

/// Response of `GET /users/{login}/settings/billing/premium_request/usage`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PremiumUsageResponse {
    pub time_period: TimePeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub usage_items: Vec<PremiumUsageItem>,
}

/// One line item from the billing usage summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSummaryItem {
    pub product: String,
    pub sku: String,
    pub unit_type: String,
    pub price_per_unit: f64,
    pub gross_quantity: f64,
    pub gross_amount: f64,
    pub discount_quantity: f64,
    pub discount_amount: f64,
    pub net_quantity: f64,
    pub net_amount: f64,
}

/// Response of `GET /users/{login}/settings/billing/usage/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSummaryResponse {
    pub time_period: TimePeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub usage_items: Vec<UsageSummaryItem>,
}

/// Account plan block on the authenticated user profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountPlan {
    pub name: String,
    pub space: u64,
    pub collaborators: u64,
    pub private_repos: u64,
}

/// Authenticated user profile from `GET /user`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<AccountPlan>,
}
