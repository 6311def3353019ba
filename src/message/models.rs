use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Kind of chat event, stored as text in the `kind` column
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    Chat,
    Join,
    Leave,
    System,
}

/// A chat event scoped to one room.
///
/// `id` is assigned by the store; notifications that are only broadcast
/// (join/leave) never get one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageModel {
    pub id: Option<i64>,
    pub room_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl MessageModel {
    /// Builds an unpersisted notification stamped with the current time
    pub fn notification(room_id: &str, sender_id: &str, kind: MessageKind, content: String) -> Self {
        Self {
            id: None,
            room_id: room_id.to_string(),
            sender_id: sender_id.to_string(),
            content,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn join(room_id: &str, sender_id: &str) -> Self {
        Self::notification(
            room_id,
            sender_id,
            MessageKind::Join,
            format!("{} joined the chat", sender_id),
        )
    }

    pub fn leave(room_id: &str, sender_id: &str) -> Self {
        Self::notification(
            room_id,
            sender_id,
            MessageKind::Leave,
            format!("{} left the chat", sender_id),
        )
    }
}

/// Input to the message store; the store fills in `timestamp` when absent
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub room_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub kind: MessageKind,
}

impl NewMessage {
    /// A chat message with no timestamp yet
    pub fn chat(room_id: &str, sender_id: &str, content: String) -> Self {
        Self {
            room_id: room_id.to_string(),
            sender_id: sender_id.to_string(),
            content,
            timestamp: None,
            kind: MessageKind::Chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(MessageKind::Chat, "CHAT")]
    #[case(MessageKind::Join, "JOIN")]
    #[case(MessageKind::Leave, "LEAVE")]
    #[case(MessageKind::System, "SYSTEM")]
    fn test_kind_text_form(#[case] kind: MessageKind, #[case] text: &str) {
        assert_eq!(kind.to_string(), text);
        assert_eq!(MessageKind::from_str(text).unwrap(), kind);
        assert_eq!(serde_json::to_value(kind).unwrap(), text);
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        assert!(MessageKind::from_str("SHOUT").is_err());
    }

    #[test]
    fn test_join_notification() {
        let message = MessageModel::join("room-1", "alice");

        assert_eq!(message.id, None);
        assert_eq!(message.kind, MessageKind::Join);
        assert_eq!(message.room_id, "room-1");
        assert_eq!(message.sender_id, "alice");
        assert_eq!(message.content, "alice joined the chat");
    }

    #[test]
    fn test_message_serializes_kind_as_type() {
        let message = MessageModel::leave("room-1", "bob");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["type"], "LEAVE");
        assert_eq!(json["sender_id"], "bob");
        assert!(json["id"].is_null());
    }
}
