use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::RoomModel;
use crate::shared::AppError;

/// Trait for room repository operations
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Overwrites the stored row; concurrent updates are last-write-wins
    async fn update_room(&self, room: &RoomModel) -> Result<(), AppError>;

    async fn list_rooms_by_owner(&self, owner_id: &str) -> Result<Vec<RoomModel>, AppError>;
}

/// In-memory implementation of RoomRepository for development and testing
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, RoomModel>>, AppError> {
        self.rooms.lock().map_err(|_| {
            warn!("Room table lock poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, owner_id = %room.owner_id, "Creating room in memory");

        let mut rooms = self.lock()?;
        if rooms.contains_key(&room.id) {
            warn!(room_id = %room.id, "Room already exists in memory");
            return Err(AppError::DatabaseError("Room already exists".to_string()));
        }
        rooms.insert(room.id.clone(), room.clone());

        debug!(room_id = %room.id, "Room created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from memory");

        let room = self.lock()?.get(room_id).cloned();

        match &room {
            Some(r) => {
                debug!(room_id = %room_id, owner_id = %r.owner_id, "Room found in memory")
            }
            None => debug!(room_id = %room_id, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self, room))]
    async fn update_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, "Updating room in memory");

        let mut rooms = self.lock()?;
        match rooms.get_mut(&room.id) {
            Some(stored) => *stored = room.clone(),
            None => {
                warn!(room_id = %room.id, "Room not found for update in memory");
                return Err(AppError::NotFound("Room not found".to_string()));
            }
        }

        debug!(
            room_id = %room.id,
            only_owner_can_write = room.only_owner_can_write,
            "Room updated successfully in memory"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_rooms_by_owner(&self, owner_id: &str) -> Result<Vec<RoomModel>, AppError> {
        debug!(owner_id = %owner_id, "Listing rooms by owner in memory");

        let mut owned: Vec<RoomModel> = self
            .lock()?
            .values()
            .filter(|room| room.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(owned)
    }
}

/// PostgreSQL implementation of room repository
pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, owner_id = %room.owner_id, "Creating room in database");

        sqlx::query(
            "INSERT INTO chat_rooms (room_id, owner_id, is_active, only_owner_can_write) VALUES ($1, $2, $3, $4)",
        )
        .bind(&room.id)
        .bind(&room.owner_id)
        .bind(room.is_active)
        .bind(room.only_owner_can_write)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room.id, "Failed to create room in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(room_id = %room.id, "Room created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from database");

        let room = sqlx::query_as::<_, RoomModel>(
            "SELECT room_id, owner_id, is_active, only_owner_can_write FROM chat_rooms WHERE room_id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to fetch room from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &room {
            Some(r) => debug!(room_id = %room_id, owner_id = %r.owner_id, "Room found in database"),
            None => debug!(room_id = %room_id, "Room not found in database"),
        }

        Ok(room)
    }

    #[instrument(skip(self, room))]
    async fn update_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, "Updating room in database");

        let result = sqlx::query(
            "UPDATE chat_rooms SET owner_id = $2, is_active = $3, only_owner_can_write = $4 WHERE room_id = $1",
        )
        .bind(&room.id)
        .bind(&room.owner_id)
        .bind(room.is_active)
        .bind(room.only_owner_can_write)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room.id, "Failed to update room in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(room_id = %room.id, "Room not found for update");
            return Err(AppError::NotFound("Room not found".to_string()));
        }

        debug!(room_id = %room.id, "Room updated successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_rooms_by_owner(&self, owner_id: &str) -> Result<Vec<RoomModel>, AppError> {
        debug!(owner_id = %owner_id, "Listing rooms by owner in database");

        let rooms = sqlx::query_as::<_, RoomModel>(
            "SELECT room_id, owner_id, is_active, only_owner_can_write FROM chat_rooms WHERE owner_id = $1 ORDER BY room_id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, owner_id = %owner_id, "Failed to list rooms from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rooms)
    }
}
