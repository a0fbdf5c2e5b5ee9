//! Shared agent state: the broadcast hub feeding every stream subscriber.

use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    /// Serialized payloads: snapshot JSON or the keep-alive token.
    pub updates: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(capacity: usize) -> Self {
        let (updates, _) = broadcast::channel(capacity);
        Self { updates }
    }

    pub fn subscriber_count(&self) -> usize {
        self.updates.receiver_count()
    }
}
