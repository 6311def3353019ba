// Room-scoped publish/subscribe
//
// Every room has one topic; the broadcast gate publishes to it and each
// WebSocket connection in the room subscribes to it.

// Public API - what other modules can use
pub use bus::{room_topic, EventBus};

// Internal modules
mod bus;
