use serde::{Deserialize, Serialize};

/// Per-connection chat state: who is connected and to which room.
///
/// Created when a WebSocket is upgraded and handed by reference to
/// everything that acts on behalf of the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub user_id: String,
    pub room_id: String,
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            room_id: room_id.into(),
        }
    }
}
