//! GitHub REST client for the billing endpoints.
//!
//! All requests are GETs carrying the API-version and bearer headers.
//! Non-2xx statuses are mapped to `ApiError::Status` with the response
//! body preserved for diagnostics.

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use super::types::{GitHubUser, PremiumUsageResponse, UsageSummaryResponse};
use crate::detect::BillingSource;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Optional filters for the premium-request usage endpoint
#[derive(Debug, Clone, Default)]
pub struct PremiumUsageQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub model: Option<String>,
    pub product: Option<String>,
}

/// Optional filters for the billing usage summary endpoint
#[derive(Debug, Clone, Default)]
pub struct UsageSummaryQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub product: Option<String>,
    pub sku: Option<String>,
}

impl PremiumUsageQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "year", self.year.map(|v| v.to_string()));
        push_param(&mut params, "month", self.month.map(|v| v.to_string()));
        push_param(&mut params, "day", self.day.map(|v| v.to_string()));
        push_param(&mut params, "model", self.model.clone());
        push_param(&mut params, "product", self.product.clone());
        params
    }
}

impl UsageSummaryQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "year", self.year.map(|v| v.to_string()));
        push_param(&mut params, "month", self.month.map(|v| v.to_string()));
        push_param(&mut params, "day", self.day.map(|v| v.to_string()));
        push_param(&mut params, "product", self.product.clone());
        push_param(&mut params, "sku", self.sku.clone());
        params
    }
}

fn push_param(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key, value));
    }
}

/// Bearer-authenticated client for `api.github.com`
pub struct ApiClient {
    agent: Agent,
    token: String,
    base_url: String,
}

impl ApiClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Client against a non-default API root (e.g. GitHub Enterprise)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        // Non-2xx responses are handled as data, not transport errors
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Authenticated user profile
    pub fn get_authenticated_user(&self) -> Result<GitHubUser, ApiError> {
        self.get("/user", &[])
    }

    /// Billing usage summary for a user
    pub fn get_usage_summary(
        &self,
        login: &str,
        query: &UsageSummaryQuery,
    ) -> Result<UsageSummaryResponse, ApiError> {
        let path = format!("/users/{login}/settings/billing/usage/summary");
        self.get(&path, &query.params())
    }

    /// Premium-request usage for a user.
    ///
    /// Returns the typed payload together with the raw JSON value so the
    /// report can carry the payload through verbatim.
    pub fn get_premium_request_usage(
        &self,
        login: &str,
        query: &PremiumUsageQuery,
    ) -> Result<(PremiumUsageResponse, serde_json::Value), ApiError> {
        let path = format!("/users/{login}/settings/billing/premium_request/usage");
        let raw: serde_json::Value = self.get(&path, &query.params())?;
        let typed = serde_json::from_value(raw.clone()).map_err(|source| ApiError::Decode {
            path,
            source,
        })?;
        Ok((typed, raw))
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let mut response = request.call().map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        debug!("GET {path} -> {status}");

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
                path: path.to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

impl BillingSource for ApiClient {
    fn authenticated_user(&self) -> Result<GitHubUser, ApiError> {
        self.get_authenticated_user()
    }

    fn usage_summary(
        &self,
        login: &str,
        year: i32,
        month: u32,
    ) -> Result<UsageSummaryResponse, ApiError> {
        self.get_usage_summary(
            login,
            &UsageSummaryQuery {
                year: Some(year),
                month: Some(month),
                ..Default::default()
            },
        )
    }
}
