use serde::{Deserialize, Serialize};

use super::models::MessageModel;
use crate::chat::SendOutcome;

/// Request payload for sending a chat message over HTTP
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Result of a send: `delivered` is false when the room's write
/// restriction dropped the message
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub delivered: bool,
    pub message: Option<MessageModel>,
}

impl From<SendOutcome> for SendMessageResponse {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Delivered(message) => Self {
                delivered: true,
                message: Some(message),
            },
            SendOutcome::Dropped => Self {
                delivered: false,
                message: None,
            },
        }
    }
}
