use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::RoomResponse;
use crate::session::CallerId;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new room
///
/// POST /api/chat/room
/// The caller (X-User-Id) becomes the owner
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<RoomResponse>, AppError> {
    info!(owner_id = %caller.as_str(), "Creating new room");

    let room = state.room_service.create_room(caller.as_str()).await?;

    Ok(Json(room.into()))
}

/// HTTP handler for fetching a single room
///
/// GET /api/chat/room/:room_id
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state.room_service.find_by_id(&room_id).await?;
    Ok(Json(room.into()))
}

/// HTTP handler listing the rooms owned by the caller
///
/// GET /api/chat/rooms
#[instrument(name = "list_owned_rooms", skip(state))]
pub async fn list_owned_rooms(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms = state.room_service.list_by_owner(caller.as_str()).await?;

    info!(room_count = rooms.len(), "Owned rooms listed successfully");

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// HTTP handler flipping the owner-only write flag
///
/// PUT /api/chat/room/:room_id/toggleWrite
/// 403 for anyone but the owner, 404 for an unknown room
#[instrument(name = "toggle_write_permission", skip(state))]
pub async fn toggle_write_permission(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    caller: CallerId,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state
        .room_service
        .toggle_write_restriction(&room_id, caller.as_str())
        .await?;

    Ok(Json(room.into()))
}
