// Public API - what other modules can use
pub use handlers::{list_room_messages, send_room_message};
pub use models::{MessageKind, MessageModel, NewMessage};
pub use types::{SendMessageRequest, SendMessageResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
