use std::sync::Arc;

use futures::future::join_all;

use crate::api::notification_channel::{
    ChannelError, ChannelKind, ChannelOutcome, NotificationChannel,
};
use crate::api::smtp_email::EmailChannel;
use crate::api::whatsapp_cloud::WhatsAppChannel;
use crate::config::app_config::AppConfig;
use crate::models::lead_models::LeadSubmission;

/// Settled outcome of every channel for one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    outcomes: Vec<(ChannelKind, ChannelOutcome)>,
}

impl DeliveryReport {
    pub fn outcomes(&self) -> &[(ChannelKind, ChannelOutcome)] {
        &self.outcomes
    }

    /// True when at least one channel actually delivered. Skips don't count.
    pub fn any_sent(&self) -> bool {
        self.outcomes.iter().any(|(_, outcome)| outcome.is_sent())
    }

    pub fn sent(&self, kind: ChannelKind) -> bool {
        self.outcomes
            .iter()
            .any(|(k, outcome)| *k == kind && outcome.is_sent())
    }
}

pub struct LeadDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl LeadDispatcher {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    pub fn from_config(config: &AppConfig, client: reqwest::Client) -> Result<Self, ChannelError> {
        Ok(Self::new(vec![
            Arc::new(EmailChannel::new(config.smtp.clone())?),
            Arc::new(WhatsAppChannel::new(config.whatsapp.clone(), client)),
        ]))
    }

    /// Attempts every channel concurrently and waits until all of them have
    /// settled. One channel failing or hanging never cancels another.
    pub async fn dispatch(&self, lead: &LeadSubmission) -> DeliveryReport {
        let attempts = self.channels.iter().map(|channel| async move {
            let outcome = channel.attempt(lead).await;
            (channel.kind(), outcome)
        });

        let report = DeliveryReport {
            outcomes: join_all(attempts).await,
        };
        tracing::info!(
            outcomes = ?report.outcomes,
            delivered = report.any_sent(),
            "Lead dispatch settled"
        );
        report
    }
}
