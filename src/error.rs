//! Error taxonomy for a refresh operation.
//!
//! Every variant is terminal to the current operation. The orchestrator
//! catches them, shows one notification and logs them; nothing here is
//! retried. Messages MUST NOT contain passwords or tokens.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshError {
    /// Malformed source URL, missing host, or unreadable credential store.
    #[error("{0}")]
    Parse(String),

    /// No usable username/password for the target.
    #[error("{0}")]
    Credential(String),

    /// Scheme or port with no matching backend.
    #[error("{0}")]
    UnsupportedEndpoint(String),

    /// Login rejected, malformed login response, or no session.
    #[error("{0}")]
    Auth(String),

    /// Listing call rejected or returned a malformed response.
    #[error("{0}")]
    Refresh(String),

    /// Network failure or timeout on any HTTP call.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl RefreshError {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RefreshError::Parse(_) => "parse",
            RefreshError::Credential(_) => "credential",
            RefreshError::UnsupportedEndpoint(_) => "unsupported endpoint",
            RefreshError::Auth(_) => "auth",
            RefreshError::Refresh(_) => "refresh",
            RefreshError::Transport(_) => "transport",
        }
    }
}
