use axum::Router;
use std::sync::Arc;

use roomchat::{
    build_router,
    message::repository::{InMemoryMessageRepository, MessageRepository},
    room::repository::{InMemoryRoomRepository, RoomRepository},
    websockets::WebsocketReceiveHandler,
    AppState, EventBus,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub state: AppState,
    pub router: Router,
    pub event_bus: EventBus,
    pub message_repository: Arc<InMemoryMessageRepository>,
    pub input_handler: WebsocketReceiveHandler,
}

pub struct TestSetupBuilder {
    broadcast_capacity: usize,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            broadcast_capacity: 100,
        }
    }

    #[allow(dead_code)]
    pub fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    pub fn build(self) -> TestSetup {
        let event_bus = EventBus::new(self.broadcast_capacity);
        let room_repository: Arc<dyn RoomRepository + Send + Sync> =
            Arc::new(InMemoryRoomRepository::new());
        let message_repository = Arc::new(InMemoryMessageRepository::new());
        let messages: Arc<dyn MessageRepository + Send + Sync> = message_repository.clone();

        let state = AppState::new(room_repository, messages, event_bus.clone());
        let input_handler = WebsocketReceiveHandler::new(Arc::clone(&state.gate));
        let router = build_router(state.clone());

        TestSetup {
            state,
            router,
            event_bus,
            message_repository,
            input_handler,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
