//! Usage aggregation and report assembly.

mod aggregate;
mod build;

pub use aggregate::{build_model_rows, totals, ModelRow, UsageTotals};
pub use build::{build_report, Report, OVERAGE_PRICE_PER_REQUEST};
