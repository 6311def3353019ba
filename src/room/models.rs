use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::AppError;

/// Database model for rooms table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RoomModel {
    #[sqlx(rename = "room_id")]
    pub id: String,       // UUID v4, generated on create
    pub owner_id: String, // Caller identity that created the room
    pub is_active: bool,
    pub only_owner_can_write: bool,
}

impl RoomModel {
    /// Creates a new active, unrestricted room with a generated ID
    pub fn new(owner_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            is_active: true,
            only_owner_can_write: false,
        }
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Whether `sender_id` may post chat messages to this room
    pub fn can_write(&self, sender_id: &str) -> bool {
        !self.only_owner_can_write || self.is_owner(sender_id)
    }

    /// Returns the next state of the room with the write restriction flipped.
    /// `self` is left untouched, so a denied caller leaves no partial change.
    pub fn with_write_restriction_toggled(&self, caller_id: &str) -> Result<Self, AppError> {
        if !self.is_owner(caller_id) {
            return Err(AppError::PermissionDenied(
                "Only room owner can toggle write permission".to_string(),
            ));
        }

        Ok(Self {
            only_owner_can_write: !self.only_owner_can_write,
            ..self.clone()
        })
    }
}
