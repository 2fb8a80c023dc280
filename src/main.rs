use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use copilot_usage::app;
use copilot_usage::config::Config;
use copilot_usage::error::UsageError;
use copilot_usage::ui::colors::{error, muted, primary};

fn main() {
    // Parse CLI arguments; argument problems are fatal before any I/O
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    setup_logging(config.debug);

    if config.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = app::run(&config) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("copilot_usage=debug")
    } else {
        EnvFilter::new("copilot_usage=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Render guidance for a fatal error on stderr
fn report_error(err: &UsageError) {
    match err {
        UsageError::CredentialMissing => {
            eprintln!(
                "\n  {} GitHub CLI (gh) is not installed.\n  Install it from: https://cli.github.com\n",
                error("Error:")
            );
        }
        UsageError::CredentialUnauthenticated { detail } => {
            eprintln!(
                "\n  {} Not authenticated with GitHub CLI.\n  Run: {}\n",
                error("Error:"),
                primary("gh auth login")
            );
            if !detail.is_empty() {
                eprintln!("  {}\n", muted(detail));
            }
        }
        UsageError::ScopeInsufficient { missing } => {
            let flags = missing
                .split(", ")
                .map(|s| format!("-s {s}"))
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!(
                "\n  {} Missing required token scopes: {missing}\n\n  \
                 The billing API requires the \"user\" scope to access usage data.\n  \
                 Your current token does not have this scope.\n\n  \
                 Run this command to add the required scope:\n\n    {}\n\n  \
                 Then run copilot-usage again.\n",
                error("Error:"),
                primary(&format!("gh auth refresh {flags}"))
            );
        }
        UsageError::Api(api) if api.is_not_found() => {
            eprintln!(
                "\n  {} The billing API returned 404 (Not Found).\n\n  \
                 This can happen if:\n  \
                 {} Your Copilot subscription is managed by an organization\n     \
                 (not a personal/individual subscription)\n  \
                 {} Your token doesn't have the required \"user\" scope\n     \
                 Fix: {}\n  \
                 {} You don't have an active Copilot subscription\n  \
                 {} Your account doesn't have the enhanced billing platform\n",
                error("Error:"),
                muted("1."),
                muted("2."),
                primary("gh auth refresh -s user"),
                muted("3."),
                muted("4.")
            );
        }
        UsageError::Api(api) => {
            eprintln!("\n  {} {}\n", error("Error:"), api.user_message());
            if api.is_forbidden() {
                eprintln!(
                    "  {}\n",
                    muted(
                        "Tip: Try re-authenticating with additional scopes:\n  gh auth refresh -s user"
                    )
                );
            }
        }
    }
}
