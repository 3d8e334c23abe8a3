pub mod telegram;

use async_trait::async_trait;

/// One inline action button attached to an operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub callback_data: String,
}

impl ActionButton {
    pub fn new(label: &str, callback_data: String) -> Self {
        Self {
            label: label.to_string(),
            callback_data,
        }
    }
}

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Sends a Markdown-formatted message with inline action buttons to the
    /// configured operator channel.
    async fn send_with_actions(&self, text: &str, actions: &[ActionButton])
        -> anyhow::Result<()>;

    /// Replaces the text of a previously sent message. No reply markup is
    /// supplied, so any buttons the message carried are dropped.
    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str)
        -> anyhow::Result<()>;
}
