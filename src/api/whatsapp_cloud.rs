use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::notification_channel::{
    settle, skip, ChannelError, ChannelKind, ChannelOutcome, NotificationChannel,
};
use crate::config::app_config::WhatsAppConfig;
use crate::models::lead_models::LeadSubmission;
use crate::utils::lead_templates::render_lead_text;

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'static str,
    text: TextBody,
}

#[derive(Debug, Serialize)]
struct TextBody {
    preview_url: bool,
    body: String,
}

/// Forwards every lead as a text message through the WhatsApp Cloud API.
pub struct WhatsAppChannel {
    config: WhatsAppConfig,
    client: Client,
}

impl WhatsAppChannel {
    pub fn new(config: WhatsAppConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn messages_url(&self, phone_id: &str) -> String {
        format!(
            "{}/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            phone_id
        )
    }

    async fn send(
        &self,
        token: &str,
        phone_id: &str,
        lead: &LeadSubmission,
    ) -> Result<(), ChannelError> {
        let payload = OutgoingMessage {
            messaging_product: "whatsapp",
            to: &self.config.notify_number,
            message_type: "text",
            text: TextBody {
                preview_url: false,
                body: render_lead_text(lead),
            },
        };

        let response = self
            .client
            .post(self.messages_url(phone_id))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::WhatsAppStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    async fn attempt(&self, lead: &LeadSubmission) -> ChannelOutcome {
        let Some((token, phone_id)) = self.config.credentials() else {
            return skip(self.kind(), "WhatsApp not configured");
        };
        settle(self.kind(), self.send(token, phone_id, lead).await)
    }
}
