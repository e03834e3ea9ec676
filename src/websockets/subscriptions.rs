use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::{EventBus, RoomEventHandler, RoomSubscription};

/// Keeps one event routing task alive per live room
///
/// Tasks end on their own when a room's channel is removed from the bus;
/// finished entries are pruned on the next call.
pub struct RoomSubscriptions {
    handler: Arc<dyn RoomEventHandler>,
    event_bus: EventBus,
    tasks: RwLock<HashMap<String, JoinHandle<()>>>,
}

impl RoomSubscriptions {
    pub fn new(handler: Arc<dyn RoomEventHandler>, event_bus: EventBus) -> Self {
        Self {
            handler,
            event_bus,
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Starts a routing task for the room unless one is already running
    pub async fn ensure_subscribed(&self, room_id: &str) {
        let mut tasks = self.tasks.write().await;
        tasks.retain(|id, handle| {
            let alive = !handle.is_finished();
            if !alive {
                debug!(room_id = %id, "Pruned finished room subscription");
            }
            alive
        });

        if tasks.contains_key(room_id) {
            return;
        }

        let subscription = RoomSubscription::new(
            room_id.to_string(),
            Arc::clone(&self.handler),
            self.event_bus.clone(),
        );
        let handle = subscription.start().await;
        tasks.insert(room_id.to_string(), handle);
    }

    /// Number of routing tasks currently tracked
    pub async fn active_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}
