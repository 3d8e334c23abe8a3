use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{ActionButton, MessagingProvider};

pub struct TelegramProvider {
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramProvider {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            token,
            chat_id,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.token, method)
    }
}

#[async_trait]
impl MessagingProvider for TelegramProvider {
    async fn send_with_actions(
        &self,
        text: &str,
        actions: &[ActionButton],
    ) -> anyhow::Result<()> {
        let buttons: Vec<serde_json::Value> = actions
            .iter()
            .map(|a| json!({ "text": a.label, "callback_data": a.callback_data }))
            .collect();

        self.client
            .post(self.api_url("sendMessage"))
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
                "reply_markup": { "inline_keyboard": [buttons] },
            }))
            .send()
            .await
            .context("failed to send Telegram message")?
            .error_for_status()
            .context("Telegram API returned error")?;

        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> anyhow::Result<()> {
        self.client
            .post(self.api_url("editMessageText"))
            .json(&json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await
            .context("failed to edit Telegram message")?
            .error_for_status()
            .context("Telegram API returned error")?;

        Ok(())
    }
}
