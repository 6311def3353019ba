use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{MessageKind, MessageModel};
use crate::shared::AppError;

/// Trait for message log operations. Rows are append-only.
#[async_trait]
pub trait MessageRepository {
    /// Stores the message and returns it with its assigned id
    async fn insert_message(&self, message: &MessageModel) -> Result<MessageModel, AppError>;

    /// All messages of a room, ascending by timestamp then insertion order
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<MessageModel>, AppError>;
}

/// In-memory implementation of MessageRepository for development and testing
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<MessageModel>>,
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Total number of stored messages across all rooms
    pub fn message_count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    #[instrument(skip(self, message))]
    async fn insert_message(&self, message: &MessageModel) -> Result<MessageModel, AppError> {
        let mut messages = self.messages.lock().map_err(|_| {
            warn!("Message table lock poisoned");
            AppError::Internal
        })?;

        let stored = MessageModel {
            id: Some(messages.len() as i64 + 1),
            ..message.clone()
        };
        messages.push(stored.clone());

        debug!(
            room_id = %stored.room_id,
            message_id = ?stored.id,
            "Message stored in memory"
        );
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<MessageModel>, AppError> {
        let messages = self.messages.lock().map_err(|_| {
            warn!("Message table lock poisoned");
            AppError::Internal
        })?;

        let mut in_room: Vec<MessageModel> = messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps
        in_room.sort_by_key(|m| m.timestamp);

        debug!(room_id = %room_id, message_count = in_room.len(), "Messages listed from memory");
        Ok(in_room)
    }
}

/// PostgreSQL implementation of the message log
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<MessageModel, AppError> {
        let kind: String = row.get("kind");
        let kind = MessageKind::from_str(&kind).map_err(|e| {
            warn!(kind = %kind, error = %e, "Unknown message kind in database");
            AppError::DatabaseError(format!("Unknown message kind: {}", kind))
        })?;
        let timestamp: DateTime<Utc> = row.get("timestamp");

        Ok(MessageModel {
            id: Some(row.get("id")),
            room_id: row.get("room_id"),
            sender_id: row.get("sender_id"),
            content: row.get("content"),
            timestamp,
            kind,
        })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    #[instrument(skip(self, message))]
    async fn insert_message(&self, message: &MessageModel) -> Result<MessageModel, AppError> {
        debug!(room_id = %message.room_id, sender_id = %message.sender_id, "Storing message in database");

        let row = sqlx::query(
            "INSERT INTO chat_messages (room_id, sender_id, content, timestamp, kind) VALUES ($1, $2, $3, $4, $5) RETURNING id, timestamp",
        )
        .bind(&message.room_id)
        .bind(&message.sender_id)
        .bind(&message.content)
        .bind(message.timestamp)
        .bind(message.kind.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %message.room_id, "Failed to store message in database");
            AppError::DatabaseError(e.to_string())
        })?;

        let stored = MessageModel {
            id: Some(row.get("id")),
            timestamp: row.get("timestamp"),
            ..message.clone()
        };

        debug!(room_id = %stored.room_id, message_id = ?stored.id, "Message stored in database");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<MessageModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, room_id, sender_id, content, timestamp, kind FROM chat_messages WHERE room_id = $1 ORDER BY timestamp ASC, id ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to list messages from database");
            AppError::DatabaseError(e.to_string())
        })?;

        rows.iter().map(Self::from_row).collect()
    }
}
