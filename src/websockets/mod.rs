// Public API
pub use handler::{serve_connection, websocket_handler, WebsocketReceiveHandler};
pub use messages::{ChatPayload, ErrorPayload, MessageType, WebSocketMessage};
pub use socket::{Connection, HandlerResponse, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod messages;
mod socket;
