use serde::{Deserialize, Serialize};

use super::models::RoomModel;

/// Response for room creation, lookup and permission toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room_id: String,
    pub owner_id: String,
    pub is_active: bool,
    pub only_owner_can_write: bool,
}

impl From<RoomModel> for RoomResponse {
    fn from(room: RoomModel) -> Self {
        Self {
            room_id: room.id,
            owner_id: room.owner_id,
            is_active: room.is_active,
            only_owner_can_write: room.only_owner_can_write,
        }
    }
}
