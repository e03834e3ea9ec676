use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// What the server remembers about a live connection
#[derive(Debug, Clone)]
pub struct PlayerEntry {
    pub username: String,
    pub room_id: Option<String>,
}

/// Registry mapping connection ids to their username and current room
///
/// This is the per-connection state behind commands that carry no room id
/// (start/restart) and behind disconnect cleanup.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Records the username and room for a connection, replacing any
    /// previous entry
    async fn assign(&self, connection_id: &str, username: String, room_id: String);

    async fn get(&self, connection_id: &str) -> Option<PlayerEntry>;

    /// Removes the entry for a connection, returning what was stored
    async fn remove(&self, connection_id: &str) -> Option<PlayerEntry>;
}

pub struct InMemoryPlayerDirectory {
    entries: Arc<RwLock<HashMap<String, PlayerEntry>>>,
}

impl InMemoryPlayerDirectory {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPlayerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerDirectory for InMemoryPlayerDirectory {
    async fn assign(&self, connection_id: &str, username: String, room_id: String) {
        debug!(
            connection_id = %connection_id,
            username = %username,
            room_id = %room_id,
            "Assigning player to room"
        );
        let mut entries = self.entries.write().await;
        entries.insert(
            connection_id.to_string(),
            PlayerEntry {
                username,
                room_id: Some(room_id),
            },
        );
    }

    async fn get(&self, connection_id: &str) -> Option<PlayerEntry> {
        let entries = self.entries.read().await;
        entries.get(connection_id).cloned()
    }

    async fn remove(&self, connection_id: &str) -> Option<PlayerEntry> {
        let mut entries = self.entries.write().await;
        entries.remove(connection_id)
    }
}
