use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{models::RoomModel, repository::RoomRepository};
use crate::shared::AppError;

/// Service for handling room business logic
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new room owned by `owner_id` with a generated ID
    #[instrument(skip(self))]
    pub async fn create_room(&self, owner_id: &str) -> Result<RoomModel, AppError> {
        if owner_id.trim().is_empty() {
            return Err(AppError::BadRequest("Owner id must not be empty".to_string()));
        }

        let room = RoomModel::new(owner_id.to_string());
        debug!(room_id = %room.id, "Generated room ID");

        self.repository.create_room(&room).await?;

        info!(
            room_id = %room.id,
            owner_id = %room.owner_id,
            "Room created successfully"
        );

        Ok(room)
    }

    /// Gets the room or fails with NotFound
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, room_id: &str) -> Result<RoomModel, AppError> {
        self.repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }

    /// Lists the rooms created by `owner_id`
    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<RoomModel>, AppError> {
        let rooms = self.repository.list_rooms_by_owner(owner_id).await?;
        debug!(owner_id = %owner_id, room_count = rooms.len(), "Rooms retrieved");
        Ok(rooms)
    }

    /// Flips the write restriction of a room on behalf of its owner
    #[instrument(skip(self))]
    pub async fn toggle_write_restriction(
        &self,
        room_id: &str,
        caller_id: &str,
    ) -> Result<RoomModel, AppError> {
        let room = self.find_by_id(room_id).await?;

        let next = room.with_write_restriction_toggled(caller_id).map_err(|e| {
            warn!(
                room_id = %room_id,
                caller_id = %caller_id,
                owner_id = %room.owner_id,
                "Non-owner attempted to toggle write permission"
            );
            e
        })?;

        self.repository.update_room(&next).await?;

        info!(
            room_id = %room_id,
            only_owner_can_write = next.only_owner_can_write,
            "Write restriction toggled"
        );

        Ok(next)
    }
}
