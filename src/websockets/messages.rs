use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::message::{MessageKind, MessageModel};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Both directions
    Chat,
    Join,
    Leave,

    // Server -> Client
    System,
    Error,
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Chat => MessageType::Chat,
            MessageKind::Join => MessageType::Join,
            MessageKind::Leave => MessageType::Leave,
            MessageKind::System => MessageType::System,
        }
    }
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Envelope shared by every frame in both directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server CHAT payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPayload {
    pub content: String,
}

/// Server-to-Client ERROR payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Wraps a room message; the frame type follows the message kind
    pub fn from_message(message: &MessageModel) -> Result<Self, serde_json::Error> {
        Ok(Self::new(message.kind.into(), serde_json::to_value(message)?))
    }

    /// Create a client CHAT frame
    pub fn chat(content: &str) -> Self {
        Self::new(MessageType::Chat, json!({ "content": content }))
    }

    /// Create a client JOIN frame
    pub fn join() -> Self {
        Self::new(MessageType::Join, json!({}))
    }

    /// Create a client LEAVE frame
    pub fn leave() -> Self {
        Self::new(MessageType::Leave, json!({}))
    }

    /// Create an ERROR message
    pub fn error(message: &str) -> Self {
        Self::new(MessageType::Error, json!({ "message": message }))
    }
}
