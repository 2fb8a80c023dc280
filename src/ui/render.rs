//! Full terminal report.

use chrono::NaiveDate;

use super::colors::{accent, dim, error, heading, label, muted, primary, success, value};
use super::format;
use super::progress::ProgressBar;
use super::table::render_model_table;
use crate::report::Report;

/// Render the colored dashboard for a report.
///
/// Pure string assembly; the caller decides where it goes.
pub fn render(report: &Report) -> String {
    let mut lines = Vec::new();

    lines.push(render_header(report));

    let bar = ProgressBar {
        current: report.total_premium_requests,
        total: f64::from(report.allowance),
        width: 50,
        label: Some("Premium Requests"),
        show_percentage: true,
        show_count: true,
    };
    lines.push(bar.render());
    lines.push(String::new());

    if report.over_quota_by > 0.0 {
        lines.push(format!(
            "  {}  {}  {}",
            error(&format!(
                "⚠ Over quota by {} requests",
                format::quantity(report.over_quota_by)
            )),
            muted("│"),
            error(&format!(
                "Est. overage: {}",
                format::money(report.overage_cost_estimate)
            )),
        ));
    } else {
        lines.push(format!(
            "  {}  {}  {}",
            success(&format!(
                "{} premium requests remaining",
                format::quantity(report.remaining)
            )),
            muted("│"),
            muted("Overage cost: $0.00"),
        ));
    }
    lines.push(String::new());

    lines.push(format!("  {}", heading("Model Breakdown")));
    lines.push(render_model_table(&report.rows));

    lines.push(String::new());
    if report.included_requests > 0.0 {
        lines.push(format!(
            "  {} {}",
            muted("*"),
            dim(&format!(
                "{} requests used included models (not counted toward premium quota)",
                format::quantity(report.included_requests)
            )),
        ));
    }
    if let Some(reset) = report.reset_date {
        lines.push(format!(
            "  {} {}",
            muted("*"),
            dim(&format!(
                "Quota resets: {}",
                reset.format("%Y-%m-%d %H:%M:%S UTC")
            )),
        ));
    }
    if report.total_cost > 0.0 {
        lines.push(format!(
            "  {} {}",
            muted("*"),
            dim(&format!(
                "Total billed: {} @ $0.04/premium request",
                format::money(report.total_cost)
            )),
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn render_header(report: &Report) -> String {
    let plan = report.plan();
    let mut lines = vec![String::new()];

    lines.push(format!("  {}", heading("GitHub Copilot Usage")));
    lines.push(format!("  {}", "─".repeat(50)));

    lines.push(format!(
        "  {}  {}  {} {} {}",
        primary(&format!("@{}", report.username)),
        muted("│"),
        label("Plan:"),
        accent(plan.display_name),
        muted(&format!("({})", plan.price_per_month)),
    ));

    let mut period = format!(
        "  {} {}",
        label("Period:"),
        value(&format!("{} {}", month_name(report.month), report.year)),
    );
    if let (Some(reset), Some(days)) = (report.reset_date, report.days_until_reset) {
        period.push_str(&format!(
            "  {}  {}",
            muted("│"),
            muted(&format!(
                "Resets {} ({} days)",
                reset.format("%b %-d, %Y"),
                days
            )),
        ));
    }
    lines.push(period);
    lines.push(String::new());

    lines.join("\n")
}

fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_else(|| month.to_string())
}
