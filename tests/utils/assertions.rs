//! Test assertion helpers - verify what a room topic subscriber observes
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};

use roomchat::{MessageKind, MessageModel};

use super::setup::TestSetup;

const RECEIVE_TIMEOUT: Duration = Duration::from_millis(500);

// ============================================================================
// Assertion Helpers
// ============================================================================

/// A subscriber on one room topic
pub struct TopicAssertion {
    receiver: broadcast::Receiver<MessageModel>,
}

impl TopicAssertion {
    pub async fn subscribe(setup: &TestSetup, room_id: &str) -> Self {
        Self {
            receiver: setup.event_bus.subscribe_to_room(room_id).await,
        }
    }

    /// Asserts the next payload has the given kind and content (consumes it)
    pub async fn received(&mut self, kind: MessageKind, content: &str) -> MessageModel {
        let message = tokio::time::timeout(RECEIVE_TIMEOUT, self.receiver.recv())
            .await
            .expect("timed out waiting for a room payload")
            .expect("room topic closed");

        assert_eq!(message.kind, kind, "received wrong message kind");
        assert_eq!(message.content, content, "received wrong content");
        message
    }

    /// Asserts nothing is waiting on the topic
    pub fn received_nothing(&mut self) {
        match self.receiver.try_recv() {
            Err(TryRecvError::Empty) => {}
            other => panic!("expected no payload, got {:?}", other),
        }
    }
}
