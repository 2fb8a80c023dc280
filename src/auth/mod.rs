//! Credential handling via the GitHub CLI.
//!
//! The dashboard never stores credentials; it borrows a token from an
//! existing `gh` login. Both helpers shell out to `gh` and return
//! structured errors so the binary can render guidance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::process::Command;
use tracing::debug;

use crate::error::UsageError;

/// Scopes the billing endpoints require. `read:user` counts as `user`.
const REQUIRED_SCOPES: &[&str] = &["user"];

/// Matches the scope line of `gh auth status`, e.g.
/// `  - Token scopes: 'gist', 'read:org', 'user'`
static SCOPE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)token scopes:\s*(.+)").expect("Invalid SCOPE_LINE regex")
});

/// Fetch the active bearer token from `gh auth token`.
///
/// An absent binary, non-zero exit, or empty stdout is fatal.
pub fn auth_token() -> Result<String, UsageError> {
    let output = Command::new("gh").args(["auth", "token"]).output();

    let output = match output {
        Ok(output) => output,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(UsageError::CredentialMissing);
        }
        Err(err) => {
            return Err(UsageError::CredentialUnauthenticated {
                detail: err.to_string(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(UsageError::CredentialUnauthenticated {
            detail: stderr.trim().to_string(),
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(UsageError::CredentialUnauthenticated {
            detail: "gh auth token returned an empty token".to_string(),
        });
    }

    Ok(token)
}

/// Scopes of the active token, parsed from `gh auth status` output.
///
/// `gh` prints the status report to stderr on some versions, so both
/// streams are searched. An unparseable report yields no scopes.
pub fn token_scopes() -> Vec<String> {
    let output = match Command::new("gh").args(["auth", "status"]).output() {
        Ok(output) => output,
        Err(err) => {
            debug!("gh auth status failed to spawn: {err}");
            return Vec::new();
        }
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    parse_scopes(&combined)
}

fn parse_scopes(output: &str) -> Vec<String> {
    let Some(captures) = SCOPE_LINE.captures(output) else {
        return Vec::new();
    };
    captures[1]
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn missing_scopes(scopes: &[String]) -> Vec<&'static str> {
    REQUIRED_SCOPES
        .iter()
        .filter(|required| {
            !scopes
                .iter()
                .any(|s| s == *required || *s == format!("read:{required}"))
        })
        .copied()
        .collect()
}

/// Verify the token carries every required scope.
///
/// Checked before the first API call so the user gets a scope-refresh
/// instruction instead of an opaque 403/404.
pub fn ensure_scopes() -> Result<(), UsageError> {
    let scopes = token_scopes();
    debug!("token scopes: {scopes:?}");

    let missing = missing_scopes(&scopes);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UsageError::ScopeInsufficient {
            missing: missing.join(", "),
        })
    }
}
