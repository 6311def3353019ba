use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use super::messages::WebSocketMessage;
use crate::message::MessageModel;
use crate::session::ChatSession;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text message to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next text message from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// What the connection should do after an inbound frame was handled
#[derive(Debug)]
pub enum HandlerResponse {
    None,
    Reply(WebSocketMessage),
    Disconnect,
}

/// Handler for incoming WebSocket messages
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle an incoming message from the client
    async fn handle_message(&self, session: &ChatSession, message: String) -> HandlerResponse;
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(_)) => continue, // Binary/ping/pong carry no chat frames
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
                None => return Ok(None), // Connection closed
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// Connection represents one client's WebSocket in one room.
/// Topic payloads from the room are forwarded to the client; client frames
/// go to the message handler together with the session.
pub struct Connection {
    session: ChatSession,
    socket: Box<dyn SocketWrapper>,
    room_events: broadcast::Receiver<MessageModel>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        session: ChatSession,
        socket: Box<dyn SocketWrapper>,
        room_events: broadcast::Receiver<MessageModel>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            session,
            socket,
            room_events,
            message_handler,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    async fn send_frame(&mut self, frame: &WebSocketMessage) -> Result<(), SocketError> {
        let text = serde_json::to_string(frame)?;
        self.socket.send_message(text).await
    }

    /// Run the connection - handles both sending and receiving until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                // Room topic -> client
                event = self.room_events.recv() => {
                    match event {
                        Ok(message) => {
                            let frame = WebSocketMessage::from_message(&message)?;
                            self.send_frame(&frame).await?;
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(
                                room_id = %self.session.room_id,
                                user_id = %self.session.user_id,
                                skipped = skipped,
                                "Connection lagged behind room topic"
                            );
                        }
                        Err(RecvError::Closed) => break,
                    }
                }

                // Client -> app
                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            let response = self
                                .message_handler
                                .handle_message(&self.session, message)
                                .await;
                            match response {
                                HandlerResponse::None => {}
                                HandlerResponse::Reply(frame) => self.send_frame(&frame).await?,
                                HandlerResponse::Disconnect => break,
                            }
                        }
                        Ok(None) => break, // Client disconnected
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        debug!(
            room_id = %self.session.room_id,
            user_id = %self.session.user_id,
            "Closing connection"
        );
        let _ = self.socket.close().await;
        Ok(())
    }
}
