use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use gamehub::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    connected_players: Arc<RwLock<Vec<String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_players: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_connected_player(&self, connection_id: &str) {
        self.connected_players
            .write()
            .await
            .push(connection_id.to_string());
    }

    pub async fn get_messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Pops the oldest recorded message for a connection
    pub async fn consume_message_for(&self, connection_id: &str) -> Option<String> {
        let mut messages = self.sent_messages.write().await;
        let queue = messages.get_mut(connection_id)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_player(&connection_id).await;
    }

    async fn remove_connection(&self, connection_id: &str) {
        self.connected_players
            .write()
            .await
            .retain(|p| p != connection_id);
    }

    async fn send_to_player(&self, connection_id: &str, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push(message.to_string());
    }

    async fn send_to_players(&self, connection_ids: &[String], message: &str) {
        for connection_id in connection_ids {
            self.send_to_player(connection_id, message).await;
        }
    }
}
