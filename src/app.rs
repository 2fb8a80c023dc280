//! End-to-end run: authenticate, detect the plan, fetch usage, and print
//! the report.
//!
//! Progress lines go to stderr so stdout carries only the report (or the
//! JSON document). Every run is an independent computation; nothing is
//! cached between invocations.

use chrono::Utc;
use tracing::debug;

use crate::api::{ApiClient, PremiumUsageQuery, DEFAULT_BASE_URL};
use crate::auth;
use crate::config::Config;
use crate::detect::{detect_plan, Confidence};
use crate::error::UsageError;
use crate::report::build_report;
use crate::ui;
use crate::ui::colors::{accent, muted, primary, success, warning};

/// Run the dashboard once with the given arguments.
///
/// Writes the report to stdout on success. All guidance for failures is
/// rendered by the caller from the returned error.
pub fn run(config: &Config) -> Result<(), UsageError> {
    let now = Utc::now();
    let (year, month) = config.period(now);
    let quiet = config.json;

    if !quiet {
        eprintln!("  {}", muted("Authenticating with GitHub CLI..."));
    }

    let token = auth::auth_token()?;
    auth::ensure_scopes()?;

    let base_url =
        std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    debug!("using API base {base_url}");
    let client = ApiClient::with_base_url(token, base_url);

    let user = client.get_authenticated_user()?;
    if !quiet {
        eprintln!(
            "  {} Authenticated as {}",
            success("✓"),
            primary(&format!("@{}", user.login))
        );
    }

    let (plan_type, detection) = match config.plan {
        Some(plan) => (plan, None),
        None => {
            if !quiet {
                eprintln!("  {}", muted("Detecting Copilot plan..."));
            }
            let detection = detect_plan(&client, now);
            if !quiet {
                let confidence = match detection.confidence {
                    Confidence::High => success("high"),
                    Confidence::Medium => warning("medium"),
                    Confidence::Low => muted("low"),
                };
                eprintln!(
                    "  {} Plan detected: {} {}{}{}",
                    success("✓"),
                    accent(detection.plan_type.as_str()),
                    muted("(confidence: "),
                    confidence,
                    muted(")")
                );
            }
            (detection.plan_type, Some(detection))
        }
    };

    if !quiet {
        eprintln!("  {}", muted("Fetching usage data..."));
    }

    let query = PremiumUsageQuery {
        year: Some(year),
        month: Some(month),
        ..Default::default()
    };
    let (usage, raw) = client.get_premium_request_usage(&user.login, &query)?;

    if !quiet {
        eprintln!("  {} Usage data loaded", success("✓"));
    }

    let report = build_report(&user.login, plan_type, (year, month), &usage, raw, detection, now);

    if config.json {
        let json = serde_json::to_string_pretty(&report.to_json())
            .expect("report JSON is serializable");
        println!("{json}");
    } else {
        println!("{}", ui::render(&report));
    }

    Ok(())
}
