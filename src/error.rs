//! Error taxonomy for the usage pipeline.
//!
//! The core modules return structured errors and never print or exit on
//! their own; guidance text (install/login/scope instructions) is rendered
//! by the binary from these variants.

use thiserror::Error;

/// Top-level error type for a usage run
#[derive(Debug, Error)]
pub enum UsageError {
    /// The GitHub CLI is not installed
    #[error("GitHub CLI (gh) is not installed")]
    CredentialMissing,

    /// Token fetch failed or returned an empty token
    #[error("not authenticated with GitHub CLI: {detail}")]
    CredentialUnauthenticated { detail: String },

    /// The token is missing a required scope
    #[error("missing required token scopes: {missing}")]
    ScopeInsufficient { missing: String },

    /// A billing API request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Error from a single GitHub API round-trip
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("API error {status} {status_text} for {path}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
        path: String,
    },

    /// The request never completed (DNS, TLS, connect, timeout)
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: ureq::Error,
    },

    /// The response body was not the expected JSON shape
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Status code of the response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Short, actionable message for the user
    pub fn user_message(&self) -> String {
        if self.is_unauthorized() {
            return "Authentication failed. Run: gh auth login".to_string();
        }
        if self.is_forbidden() {
            return "Insufficient permissions. Your token may need additional scopes.\n\
                    Try: gh auth refresh -s read:user"
                .to_string();
        }
        if self.is_not_found() {
            return "Resource not found. This endpoint may not be available for your account.\n\
                    The billing API requires the enhanced billing platform."
                .to_string();
        }
        match self {
            ApiError::Status {
                status,
                status_text,
                ..
            } => format!("API request failed: {} {}", status, status_text),
            other => other.to_string(),
        }
    }
}
