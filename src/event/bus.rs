use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::message::MessageModel;

/// Topic a room's messages are published on
pub fn room_topic(room_id: &str) -> String {
    format!("/topic/{}", room_id)
}

/// Topic-based publish/subscribe bus fanning payloads out to subscribers
#[derive(Debug, Clone)]
pub struct EventBus {
    /// topic -> sender
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<MessageModel>>>>,
    capacity: usize,
}

impl EventBus {
    /// Creates a bus whose per-topic channels buffer `capacity` payloads
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Sends `payload` to every current subscriber of `topic`.
    /// Returns how many subscribers received it. A topic whose last
    /// subscriber is gone is removed.
    pub async fn publish(&self, topic: &str, payload: MessageModel) -> usize {
        let topics = self.topics.read().await;

        let delivered = match topics.get(topic) {
            Some(sender) => sender.send(payload).ok(),
            None => {
                debug!(topic = %topic, "No subscribers for topic");
                return 0;
            }
        };
        drop(topics);

        match delivered {
            Some(receiver_count) => {
                debug!(topic = %topic, receivers = receiver_count, "Payload published");
                receiver_count
            }
            None => {
                debug!(topic = %topic, "Payload published with no receivers");
                self.remove_if_idle(topic).await;
                0
            }
        }
    }

    async fn remove_if_idle(&self, topic: &str) {
        let mut topics = self.topics.write().await;
        // A subscriber may have arrived between the locks
        if topics
            .get(topic)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            topics.remove(topic);
            debug!(topic = %topic, "Removed idle topic");
        }
    }

    /// Number of topics with a live channel
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }

    /// Subscribe to a topic, creating its channel on first use
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<MessageModel> {
        let topics = self.topics.read().await;

        if let Some(sender) = topics.get(topic) {
            sender.subscribe()
        } else {
            debug!(topic = %topic, "Creating new topic channel for subscription");
            drop(topics);

            let mut topics = self.topics.write().await;
            // Another subscriber may have created it between the locks
            topics
                .entry(topic.to_string())
                .or_insert_with(|| broadcast::channel(self.capacity).0)
                .subscribe()
        }
    }

    /// Publishes to the topic of `room_id`
    pub async fn publish_to_room(&self, room_id: &str, payload: MessageModel) -> usize {
        self.publish(&room_topic(room_id), payload).await
    }

    /// Subscribes to the topic of `room_id`
    pub async fn subscribe_to_room(&self, room_id: &str) -> broadcast::Receiver<MessageModel> {
        self.subscribe(&room_topic(room_id)).await
    }
}
