use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::api::notification_channel::{
    settle, skip, ChannelError, ChannelKind, ChannelOutcome, NotificationChannel,
};
use crate::config::app_config::{SmtpConfig, SmtpRelay, SmtpTlsMode};
use crate::models::lead_models::LeadSubmission;
use crate::utils::lead_templates::{render_lead_html, LEAD_SUBJECT};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Emails every lead to the operator inbox through the configured SMTP relay.
pub struct EmailChannel {
    config: SmtpConfig,
    // Built once when the relay is configured, shared by every send
    relay: Option<(SmtpRelay, SmtpTransport)>,
}

impl EmailChannel {
    pub fn new(config: SmtpConfig) -> Result<Self, ChannelError> {
        let relay = match config.relay() {
            Some(relay) => {
                let transport = Self::transport(&relay)?;
                Some((relay, transport))
            }
            None => None,
        };
        Ok(Self { config, relay })
    }

    fn transport(relay: &SmtpRelay) -> Result<SmtpTransport, ChannelError> {
        let tls = match relay.tls {
            SmtpTlsMode::Implicit => Tls::Wrapper(TlsParameters::new(relay.host.clone())?),
            SmtpTlsMode::StartTls => Tls::Required(TlsParameters::new(relay.host.clone())?),
            SmtpTlsMode::Opportunistic => {
                Tls::Opportunistic(TlsParameters::new(relay.host.clone())?)
            }
            SmtpTlsMode::None => Tls::None,
        };

        Ok(SmtpTransport::builder_dangerous(relay.host.as_str())
            .port(relay.port)
            .tls(tls)
            .credentials(Credentials::new(
                relay.username.clone(),
                relay.password.clone(),
            ))
            .build())
    }

    pub fn build_message(&self, lead: &LeadSubmission) -> Result<Message, ChannelError> {
        let from: Mailbox = self.config.from.parse()?;
        let to: Mailbox = self.config.notify_email.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(LEAD_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(render_lead_html(lead)?)?;
        Ok(message)
    }

    async fn send(
        &self,
        relay: &SmtpRelay,
        transport: &SmtpTransport,
        lead: &LeadSubmission,
    ) -> Result<(), ChannelError> {
        let message = self.build_message(lead)?;
        tracing::debug!(
            host = %relay.host,
            port = relay.port,
            tls = ?relay.tls,
            "Sending lead email"
        );
        transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    async fn attempt(&self, lead: &LeadSubmission) -> ChannelOutcome {
        let Some((relay, transport)) = &self.relay else {
            return skip(self.kind(), "SMTP not configured");
        };
        settle(self.kind(), self.send(relay, transport, lead).await)
    }
}
