use async_trait::async_trait;
use axum::{
    extract::{ws::WebSocket, Path, Query, State, WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::chat::{BroadcastGate, SendOutcome};
use crate::session::{CallerId, ChatSession};
use crate::shared::{AppError, AppState};
use crate::websockets::messages::{ChatPayload, MessageType, WebSocketMessage};

use super::socket::{Connection, HandlerResponse, MessageHandler, SocketWrapper};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    gate: Arc<BroadcastGate>,
}

impl WebsocketReceiveHandler {
    pub fn new(gate: Arc<BroadcastGate>) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, session: &ChatSession, message: String) -> HandlerResponse {
        debug!(
            user_id = %session.user_id,
            room_id = %session.room_id,
            "Received message"
        );

        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(
                    user_id = %session.user_id,
                    room_id = %session.room_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                return HandlerResponse::Reply(WebSocketMessage::error("Malformed message"));
            }
        };

        match ws_message.message_type {
            MessageType::Chat => {
                let payload = match serde_json::from_value::<ChatPayload>(ws_message.payload) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, "Chat message without content");
                        return HandlerResponse::Reply(WebSocketMessage::error(
                            "Chat message requires content",
                        ));
                    }
                };

                match self
                    .gate
                    .handle_send(&session.room_id, &session.user_id, payload.content)
                    .await
                {
                    // The sender sees its own message through the room topic
                    Ok(SendOutcome::Delivered(_)) | Ok(SendOutcome::Dropped) => {
                        HandlerResponse::None
                    }
                    Err(e) => {
                        warn!(
                            user_id = %session.user_id,
                            room_id = %session.room_id,
                            error = %e,
                            "Failed to handle chat message"
                        );
                        HandlerResponse::Reply(WebSocketMessage::error(&e.to_string()))
                    }
                }
            }
            MessageType::Join => {
                self.gate
                    .handle_join(&session.room_id, &session.user_id)
                    .await;
                HandlerResponse::None
            }
            MessageType::Leave => HandlerResponse::Disconnect,
            other => {
                debug!(message_type = ?other, "Unhandled message type");
                HandlerResponse::Reply(WebSocketMessage::error("Unsupported message type"))
            }
        }
    }
}

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct WebSocketQuery {
    pub user_id: Option<String>,
}

/// Identity for a WebSocket handshake. Browsers cannot set headers on the
/// handshake, so a non-blank `user_id` query parameter wins over the header.
fn resolve_user_id(query_user_id: Option<String>, headers: &HeaderMap) -> Result<String, AppError> {
    match query_user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
    {
        Some(user_id) => Ok(user_id),
        None => Ok(CallerId::from_headers(headers)?.0),
    }
}

/// WebSocket upgrade handler
///
/// GET /ws/:room_id?user_id=X (or X-User-Id header)
/// Upgrades to a WebSocket subscribed to the room's topic
#[instrument(name = "websocket_handler", skip(state, ws, headers))]
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    Query(query): Query<WebSocketQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let user_id = resolve_user_id(query.user_id, &headers)?;

    info!(
        room_id = %room_id,
        user_id = %user_id,
        "WebSocket connection requested"
    );

    // Unknown rooms are rejected before the upgrade
    state.room_service.find_by_id(&room_id).await.map_err(|e| {
        warn!(room_id = %room_id, "Room not found, rejecting WebSocket connection");
        e
    })?;

    let session = ChatSession::new(user_id, room_id);
    Ok(ws.on_upgrade(move |socket| handle_websocket_connection(socket, session, state)))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: WebSocket, session: ChatSession, state: AppState) {
    info!(
        room_id = %session.room_id,
        user_id = %session.user_id,
        "WebSocket connection established"
    );

    serve_connection(Box::new(socket), session, state).await;
}

/// Runs one client in its room until it leaves or disconnects, then
/// announces the leave on the room topic exactly once
pub async fn serve_connection(
    socket: Box<dyn SocketWrapper>,
    session: ChatSession,
    state: AppState,
) {
    let room_events = state.event_bus.subscribe_to_room(&session.room_id).await;
    let message_handler = Arc::new(WebsocketReceiveHandler::new(Arc::clone(&state.gate)));

    let connection = Connection::new(session.clone(), socket, room_events, message_handler);

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(
                room_id = %session.room_id,
                user_id = %session.user_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                room_id = %session.room_id,
                user_id = %session.user_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    state
        .gate
        .handle_leave(&session.room_id, &session.user_id)
        .await;
}
