//! Report assembly.
//!
//! Composes the catalog, reset clock, and aggregator outputs into one
//! immutable value the renderers consume. Building a report never fails;
//! upstream errors are surfaced before this point.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use serde_json::json;

use crate::api::types::PremiumUsageResponse;
use crate::detect::PlanDetection;
use crate::models::{days_until_reset, plan_info, reset_date, PlanInfo, PlanType};
use crate::report::aggregate::{build_model_rows, totals, ModelRow};

/// GitHub's published per-request overage price in USD
pub const OVERAGE_PRICE_PER_REQUEST: f64 = 0.04;

/// Everything the presentation layers need for one billing month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub username: String,
    pub plan_type: PlanType,
    pub year: i32,
    pub month: u32,
    pub is_current_month: bool,
    /// Present only when reporting on the current month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_reset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_date: Option<DateTime<Utc>>,
    /// Monthly premium-request allowance for the plan
    pub allowance: u32,
    pub total_requests: f64,
    pub total_premium_requests: f64,
    pub total_cost: f64,
    /// Requests served by included models at no quota cost
    pub included_requests: f64,
    pub remaining: f64,
    pub over_quota_by: f64,
    /// Percent of allowance used, one decimal, not capped
    pub percent_used: f64,
    pub overage_cost_estimate: f64,
    /// Present only when the plan was auto-detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<PlanDetection>,
    pub rows: Vec<ModelRow>,
    /// Premium-usage payload exactly as the API returned it
    pub raw: serde_json::Value,
}

impl Report {
    /// Catalog entry for this report's plan
    pub fn plan(&self) -> &'static PlanInfo {
        plan_info(self.plan_type)
    }

    /// Stable machine-readable projection for `--json` output
    pub fn to_json(&self) -> serde_json::Value {
        let mut plan = json!({
            "type": self.plan_type,
            "name": self.plan().display_name,
            "monthlyAllowance": self.allowance,
        });
        if let Some(detection) = &self.detection {
            plan["detected"] = json!(true);
            plan["confidence"] = json!(detection.confidence);
        }

        json!({
            "plan": plan,
            "usage": {
                "totalPremiumRequests": self.total_premium_requests,
                "remaining": self.remaining,
                "percentUsed": self.percent_used,
                "models": self.rows,
            },
            "raw": self.raw,
        })
    }
}

/// Build the report for one billing month.
///
/// `raw` is the unmodified premium-usage payload and is carried through
/// verbatim; `usage` is its typed projection. The reset fields are filled
/// only when (year, month) is the current UTC month.
pub fn build_report(
    username: &str,
    plan_type: PlanType,
    period: (i32, u32),
    usage: &PremiumUsageResponse,
    raw: serde_json::Value,
    detection: Option<PlanDetection>,
    now: DateTime<Utc>,
) -> Report {
    let (year, month) = period;
    let rows = build_model_rows(&usage.usage_items, plan_type);
    let sums = totals(&rows);

    let allowance = plan_info(plan_type).monthly_premium_requests;
    let allowance_f = f64::from(allowance);
    let remaining = (allowance_f - sums.total_premium_requests).max(0.0);
    let over_quota_by = (sums.total_premium_requests - allowance_f).max(0.0);
    let percent_used = if allowance > 0 {
        round1(sums.total_premium_requests / allowance_f * 100.0)
    } else {
        0.0
    };

    let is_current_month = year == now.year() && month == now.month();

    Report {
        username: username.to_string(),
        plan_type,
        year,
        month,
        is_current_month,
        days_until_reset: is_current_month.then(|| days_until_reset(now)),
        reset_date: is_current_month.then(|| reset_date(now)),
        allowance,
        total_requests: sums.total_requests,
        total_premium_requests: sums.total_premium_requests,
        total_cost: sums.total_cost,
        included_requests: sums.included_requests,
        remaining,
        over_quota_by,
        percent_used,
        overage_cost_estimate: over_quota_by * OVERAGE_PRICE_PER_REQUEST,
        detection,
        rows,
        raw,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
