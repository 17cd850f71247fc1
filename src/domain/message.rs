//! Chat message types for the assistant simulation.

use serde::{Deserialize, Serialize};

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

/// One entry in the ordered, append-only chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonically increasing id within the transcript.
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Unix timestamp (seconds) when the message was appended.
    pub timestamp: i64,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn now(id: u64, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Formats the timestamp as `HH:MM` for the transcript margin.
    #[must_use]
    pub fn time_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
            .map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_label_formats_valid_timestamp() {
        let msg = ChatMessage {
            id: 1,
            sender: Sender::User,
            text: "hello".to_string(),
            timestamp: 0,
        };
        assert_eq!(msg.time_label(), "00:00");
    }
}
