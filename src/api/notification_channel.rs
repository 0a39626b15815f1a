use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::lead_models::LeadSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Email,
    WhatsApp,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single delivery attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    Sent,
    /// The channel has no configuration. Not a failure, not a delivery either.
    Skipped,
    Failed(String),
}

impl ChannelOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ChannelOutcome::Sent)
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("failed to render email: {0}")]
    Template(#[from] askama::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("[WhatsApp] {status}: {body}")]
    WhatsAppStatus { status: u16, body: String },
}

/// A place a lead can be forwarded to.
///
/// `attempt` never returns an error: whatever happens inside the channel is
/// folded into a [`ChannelOutcome`] so the dispatcher can wait for every
/// channel regardless of how the others fared.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    async fn attempt(&self, lead: &LeadSubmission) -> ChannelOutcome;
}

/// Logs a finished send and converts it into an outcome.
pub(crate) fn settle(kind: ChannelKind, result: Result<(), ChannelError>) -> ChannelOutcome {
    match result {
        Ok(()) => {
            tracing::info!(channel = %kind, "Lead delivered");
            ChannelOutcome::Sent
        }
        Err(e) => {
            tracing::error!(channel = %kind, error = %e, "Lead delivery failed");
            ChannelOutcome::Failed(e.to_string())
        }
    }
}

pub(crate) fn skip(kind: ChannelKind, reason: &str) -> ChannelOutcome {
    tracing::warn!(channel = %kind, "[lead] {}; skipping {} send", reason, kind);
    ChannelOutcome::Skipped
}
