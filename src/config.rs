//! Command line arguments.

use chrono::{DateTime, Datelike, Utc};
use clap::Parser;

use crate::models::PlanType;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "copilot-usage",
    version,
    about = "GitHub Copilot premium request usage dashboard"
)]
pub struct Config {
    /// Override Copilot plan detection
    #[arg(long, value_enum)]
    pub plan: Option<PlanType>,

    /// Year to query (defaults to the current year)
    #[arg(long, value_parser = clap::value_parser!(i32).range(2024..=2100))]
    pub year: Option<i32>,

    /// Month to query, 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Output machine-readable JSON instead of the formatted dashboard
    #[arg(long)]
    pub json: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Config {
    /// Billing period to query, defaulting to the current UTC month
    pub fn period(&self, now: DateTime<Utc>) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| now.year()),
            self.month.unwrap_or_else(|| now.month()),
        )
    }
}
