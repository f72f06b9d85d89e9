//! Chat notification delivery.
//!
//! A `Notifier` performs exactly one outbound send per call. Retries and rate
//! limits are left to the messaging backend.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use homework_common::error::NotifyError;

/// Something that can deliver a text message to a chat.
pub trait Notifier {
    fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope returned by every Telegram Bot API method.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API client limited to `sendMessage`.
pub struct TelegramNotifier {
    client: reqwest::Client,
    send_message_url: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            send_message_url: format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), token),
        })
    }
}

impl Notifier for TelegramNotifier {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.send_message_url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await?;

        let status = response.status();
        // The Bot API reports failures in the body even for 4xx codes.
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => {
                tracing::debug!(chat_id, "Telegram accepted message");
                Ok(())
            }
            other => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: other
                    .and_then(|b| b.description)
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}
