use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    models::{MessageModel, NewMessage},
    repository::MessageRepository,
};
use crate::shared::AppError;

const STORED_SUBSEC_DIGITS: u16 = 6;

/// Service over the append-only message log
pub struct MessageService {
    repository: Arc<dyn MessageRepository + Send + Sync>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Appends a message, stamping the arrival time when none was given.
    /// Timestamps are kept at microsecond precision, the resolution of the
    /// `TIMESTAMPTZ` column, so the returned message equals the stored row.
    #[instrument(skip(self, message), fields(room_id = %message.room_id))]
    pub async fn append(&self, message: NewMessage) -> Result<MessageModel, AppError> {
        if message.room_id.is_empty() {
            return Err(AppError::BadRequest("Room id must not be empty".to_string()));
        }

        let model = MessageModel {
            id: None,
            room_id: message.room_id,
            sender_id: message.sender_id,
            content: message.content,
            timestamp: message
                .timestamp
                .unwrap_or_else(Utc::now)
                .trunc_subsecs(STORED_SUBSEC_DIGITS),
            kind: message.kind,
        };

        let stored = self.repository.insert_message(&model).await?;
        debug!(message_id = ?stored.id, "Message appended");
        Ok(stored)
    }

    /// Messages of a room in arrival order; empty when the room has none
    #[instrument(skip(self))]
    pub async fn list_by_room(&self, room_id: &str) -> Result<Vec<MessageModel>, AppError> {
        if room_id.is_empty() {
            return Err(AppError::BadRequest("Room id must not be empty".to_string()));
        }

        self.repository.list_by_room(room_id).await
    }
}
