//! Copilot plan auto-detection.
//!
//! Combines two signals: the `plan.name` field on the authenticated user
//! profile, and the discounted premium-request totals in the current
//! month's billing summary. The discount total for a month can never
//! exceed that month's allowance, so a total above a known plan boundary
//! pins the plan exactly; totals below a boundary cannot distinguish a
//! higher plan under light usage from the plan itself, and the profile
//! heuristic takes over.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tracing::debug;

use crate::api::types::{GitHubUser, UsageSummaryResponse};
use crate::error::ApiError;
use crate::models::PlanType;

/// How a detected plan type was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Quantitative billing signal exceeded a plan boundary
    High,
    /// Profile plan name mapped cleanly to a known plan
    Medium,
    /// Fallback default
    Low,
}

/// Result of plan auto-detection
#[derive(Debug, Clone, Serialize)]
pub struct PlanDetection {
    pub plan_type: PlanType,
    pub confidence: Confidence,
    pub reason: String,
}

/// Read-only billing endpoints the detector consumes.
///
/// `ApiClient` implements this against the live API; tests drive every
/// branch with literal payloads.
pub trait BillingSource {
    fn authenticated_user(&self) -> Result<GitHubUser, ApiError>;
    fn usage_summary(
        &self,
        login: &str,
        year: i32,
        month: u32,
    ) -> Result<UsageSummaryResponse, ApiError>;
}

/// Free plan monthly allowance, used as a detection boundary
const FREE_LIMIT: f64 = 50.0;
/// Pro plan monthly allowance, used as a detection boundary
const PRO_LIMIT: f64 = 300.0;

/// Auto-detect the user's Copilot plan.
///
/// Never fails: every upstream error degrades to a lower-confidence
/// answer. Defaults to Pro when no signal is available.
pub fn detect_plan<S: BillingSource>(source: &S, now: DateTime<Utc>) -> PlanDetection {
    let user = match source.authenticated_user() {
        Ok(user) => user,
        Err(err) => {
            debug!("plan detection: profile fetch failed: {err}");
            return PlanDetection {
                plan_type: PlanType::Pro,
                confidence: Confidence::Low,
                reason: "Could not fetch user profile; defaulting to Pro".to_string(),
            };
        }
    };

    let github_plan = user.plan.as_ref().map(|p| p.name.to_lowercase());

    if let Some(detection) = detect_from_summary(source, &user.login, now) {
        return detection;
    }

    // Profile-based fallback
    match github_plan.as_deref() {
        Some("free") => PlanDetection {
            plan_type: PlanType::Free,
            confidence: Confidence::Medium,
            reason: "GitHub Free account detected; assuming Copilot Free".to_string(),
        },
        Some("pro") => PlanDetection {
            plan_type: PlanType::Pro,
            confidence: Confidence::Medium,
            reason: "GitHub Pro account detected; assuming Copilot Pro".to_string(),
        },
        other => PlanDetection {
            plan_type: PlanType::Pro,
            confidence: Confidence::Low,
            reason: format!(
                "GitHub plan \"{}\" detected; defaulting to Pro",
                other.unwrap_or("unknown")
            ),
        },
    }
}

/// Quantitative check against the current month's billing summary.
///
/// Returns `None` when the summary is unavailable, carries no Copilot
/// items, or the discount total stays under every boundary.
fn detect_from_summary<S: BillingSource>(
    source: &S,
    login: &str,
    now: DateTime<Utc>,
) -> Option<PlanDetection> {
    let summary = match source.usage_summary(login, now.year(), now.month()) {
        Ok(summary) => summary,
        Err(err) => {
            debug!("plan detection: summary fetch failed: {err}");
            return None;
        }
    };

    if summary.usage_items.is_empty() {
        return None;
    }

    let total_discount: f64 = summary
        .usage_items
        .iter()
        .filter(|item| {
            let product = item.product.to_lowercase();
            let sku = item.sku.to_lowercase();
            product.contains("copilot") || sku.contains("copilot") || sku.contains("premium")
        })
        .map(|item| item.discount_quantity)
        .sum();

    if total_discount == 0.0 {
        // Either nothing matched the filter or nothing was discounted;
        // no usable signal.
        return None;
    }

    debug!("plan detection: {total_discount} discounted premium requests this month");

    if total_discount > PRO_LIMIT {
        return Some(PlanDetection {
            plan_type: PlanType::ProPlus,
            confidence: Confidence::High,
            reason: format!(
                "Detected {total_discount} discounted premium requests (exceeds Pro limit of 300)"
            ),
        });
    }

    if total_discount > FREE_LIMIT {
        return Some(PlanDetection {
            plan_type: PlanType::Pro,
            confidence: Confidence::High,
            reason: format!(
                "Detected {total_discount} discounted premium requests (exceeds Free limit of 50)"
            ),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AccountPlan, UsageSummaryItem};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    struct StubSource {
        user: Result<GitHubUser, ()>,
        summary: Result<UsageSummaryResponse, ()>,
    }

    impl BillingSource for StubSource {
        fn authenticated_user(&self) -> Result<GitHubUser, ApiError> {
            self.user.clone().map_err(|_| api_error())
        }

        fn usage_summary(
            &self,
            _login: &str,
            _year: i32,
            _month: u32,
        ) -> Result<UsageSummaryResponse, ApiError> {
            self.summary.clone().map_err(|_| api_error())
        }
    }

    fn api_error() -> ApiError {
        ApiError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: String::new(),
            path: "/stub".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn user_with_plan(plan: &str) -> GitHubUser {
        GitHubUser {
            login: "octocat".to_string(),
            plan: Some(AccountPlan {
                name: plan.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn copilot_summary(discounts: &[f64]) -> UsageSummaryResponse {
        UsageSummaryResponse {
            usage_items: discounts
                .iter()
                .map(|&d| UsageSummaryItem {
                    product: "Copilot".to_string(),
                    sku: "copilot_premium_requests".to_string(),
                    discount_quantity: d,
                    gross_quantity: d,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn empty_summary() -> UsageSummaryResponse {
        UsageSummaryResponse::default()
    }

    #[test]
    fn test_profile_failure_defaults_to_pro_low() {
        let source = StubSource {
            user: Err(()),
            summary: Ok(copilot_summary(&[400.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.reason.contains("profile"));
    }

    #[test]
    fn test_discount_above_pro_limit_means_pro_plus() {
        let source = StubSource {
            user: Ok(user_with_plan("pro")),
            summary: Ok(copilot_summary(&[400.0, 50.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::ProPlus);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.reason.contains("450"));
        assert!(result.reason.contains("exceeds Pro limit of 300"));
    }

    #[test]
    fn test_discount_above_free_limit_means_pro() {
        let source = StubSource {
            user: Ok(user_with_plan("free")),
            summary: Ok(copilot_summary(&[120.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.reason.contains("exceeds Free limit of 50"));
    }

    #[test]
    fn test_boundaries_are_strict() {
        // Exactly 300 is no Pro+ signal, but it still exceeds the Free limit
        let source = StubSource {
            user: Ok(user_with_plan("pro")),
            summary: Ok(copilot_summary(&[300.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.reason.contains("exceeds Free limit of 50"));

        // Exactly at the Free boundary no quantitative signal fires
        let source = StubSource {
            user: Ok(user_with_plan("free")),
            summary: Ok(copilot_summary(&[50.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Free);
        assert_eq!(result.confidence, Confidence::Medium);

        // One past the boundary flips to high confidence
        let source = StubSource {
            user: Ok(user_with_plan("free")),
            summary: Ok(copilot_summary(&[51.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::High);

        let source = StubSource {
            user: Ok(user_with_plan("pro")),
            summary: Ok(copilot_summary(&[301.0])),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::ProPlus);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_non_copilot_items_are_ignored() {
        let summary = UsageSummaryResponse {
            usage_items: vec![UsageSummaryItem {
                product: "Actions".to_string(),
                sku: "actions_linux".to_string(),
                discount_quantity: 2000.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let source = StubSource {
            user: Ok(user_with_plan("free")),
            summary: Ok(summary),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Free);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.reason.contains("Free account"));
    }

    #[test]
    fn test_premium_sku_matches_filter() {
        let summary = UsageSummaryResponse {
            usage_items: vec![UsageSummaryItem {
                product: "Other".to_string(),
                sku: "premium_model_requests".to_string(),
                discount_quantity: 400.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let source = StubSource {
            user: Ok(user_with_plan("pro")),
            summary: Ok(summary),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::ProPlus);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_empty_summary_falls_back_to_profile() {
        let source = StubSource {
            user: Ok(user_with_plan("free")),
            summary: Ok(empty_summary()),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Free);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_summary_failure_falls_back_to_profile() {
        let source = StubSource {
            user: Ok(user_with_plan("pro")),
            summary: Err(()),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.reason.contains("Pro account"));
    }

    #[test]
    fn test_unknown_plan_defaults_to_pro_low() {
        let source = StubSource {
            user: Ok(user_with_plan("enterprise")),
            summary: Ok(empty_summary()),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.reason.contains("enterprise"));
    }

    #[test]
    fn test_missing_plan_defaults_to_pro_low() {
        let user = GitHubUser {
            login: "octocat".to_string(),
            ..Default::default()
        };
        let source = StubSource {
            user: Ok(user),
            summary: Ok(empty_summary()),
        };
        let result = detect_plan(&source, now());
        assert_eq!(result.plan_type, PlanType::Pro);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.reason.contains("unknown"));
    }
}
