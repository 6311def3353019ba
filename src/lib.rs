// Library crate for the room chat server
// This file exposes the public API for integration tests

pub mod chat;
pub mod config;
pub mod event;
pub mod message;
pub mod room;
pub mod schema;
pub mod session;
pub mod shared;
pub mod websockets;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use chat::{BroadcastGate, SendOutcome};
pub use config::AppConfig;
pub use event::EventBus;
pub use message::{MessageKind, MessageModel};
pub use room::models::RoomModel;
pub use shared::{AppError, AppState};

/// Builds the full HTTP + WebSocket router over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/chat/room", post(room::create_room))
        .route("/api/chat/rooms", get(room::list_owned_rooms))
        .route("/api/chat/room/:room_id", get(room::get_room))
        .route(
            "/api/chat/room/:room_id/toggleWrite",
            put(room::toggle_write_permission),
        )
        .route(
            "/api/chat/room/:room_id/messages",
            get(message::list_room_messages).post(message::send_room_message),
        )
        .route("/ws/:room_id", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
