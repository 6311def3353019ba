use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::event::EventBus;
use crate::message::{service::MessageService, MessageModel, NewMessage};
use crate::room::repository::RoomRepository;
use crate::shared::AppError;

/// What happened to a chat message handed to the gate
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Persisted and published to the room topic
    Delivered(MessageModel),
    /// The room is owner-only and the sender is not the owner
    Dropped,
}

/// Checks senders against a room's write restriction, persists accepted
/// messages and fans them out to the room topic
pub struct BroadcastGate {
    rooms: Arc<dyn RoomRepository + Send + Sync>,
    messages: Arc<MessageService>,
    event_bus: EventBus,
}

impl BroadcastGate {
    pub fn new(
        rooms: Arc<dyn RoomRepository + Send + Sync>,
        messages: Arc<MessageService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            rooms,
            messages,
            event_bus,
        }
    }

    /// Handles a chat message from `sender_id`.
    ///
    /// A non-owner writing to a restricted room gets `Dropped`: nothing is
    /// stored, nothing is published and no error is raised.
    #[instrument(skip(self, content))]
    pub async fn handle_send(
        &self,
        room_id: &str,
        sender_id: &str,
        content: String,
    ) -> Result<SendOutcome, AppError> {
        let room = self
            .rooms
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        if !room.can_write(sender_id) {
            debug!(
                room_id = %room_id,
                sender_id = %sender_id,
                "Room is owner-only, dropping message"
            );
            return Ok(SendOutcome::Dropped);
        }

        let stored = self
            .messages
            .append(NewMessage::chat(room_id, sender_id, content))
            .await?;

        let receivers = self
            .event_bus
            .publish_to_room(room_id, stored.clone())
            .await;

        info!(
            room_id = %room_id,
            sender_id = %sender_id,
            message_id = ?stored.id,
            receivers = receivers,
            "Chat message delivered"
        );

        Ok(SendOutcome::Delivered(stored))
    }

    /// Announces `sender_id` joining the room. Not persisted, and allowed
    /// regardless of the write restriction.
    #[instrument(skip(self))]
    pub async fn handle_join(&self, room_id: &str, sender_id: &str) -> MessageModel {
        let notification = MessageModel::join(room_id, sender_id);
        self.event_bus
            .publish_to_room(room_id, notification.clone())
            .await;

        info!(room_id = %room_id, sender_id = %sender_id, "Join announced");
        notification
    }

    /// Announces `sender_id` leaving the room. Not persisted.
    #[instrument(skip(self))]
    pub async fn handle_leave(&self, room_id: &str, sender_id: &str) -> MessageModel {
        let notification = MessageModel::leave(room_id, sender_id);
        self.event_bus
            .publish_to_room(room_id, notification.clone())
            .await;

        info!(room_id = %room_id, sender_id = %sender_id, "Leave announced");
        notification
    }
}
