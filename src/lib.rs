//! Personal GitHub Copilot premium-request usage dashboard.
//!
//! Borrows a token from the `gh` CLI, reads the enhanced billing
//! endpoints, infers the Copilot plan from profile and billing signals,
//! and renders per-model quota utilization as a colored dashboard or
//! stable JSON.
//!
//! The domain pipeline (catalog, reset clock, detector, aggregator,
//! report) is pure and synchronous; all I/O happens in [`app`] before the
//! report is built.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod detect;
pub mod error;
pub mod models;
pub mod report;
pub mod ui;
