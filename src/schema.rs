use sqlx::PgPool;
use tracing::{info, instrument};

use crate::shared::AppError;

const STATEMENTS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS chat_rooms (
        room_id TEXT PRIMARY KEY,
        owner_id TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        only_owner_can_write BOOLEAN NOT NULL DEFAULT FALSE
    )",
    "CREATE TABLE IF NOT EXISTS chat_messages (
        id BIGSERIAL PRIMARY KEY,
        room_id TEXT NOT NULL REFERENCES chat_rooms (room_id),
        sender_id TEXT NOT NULL,
        content TEXT NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        kind TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS chat_messages_room_timestamp
        ON chat_messages (room_id, timestamp, id)",
];

/// Creates the chat tables when they are missing
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}
