use serde_json::json;
use tokio::time::{sleep, Duration};

use gamehub::{
    event::RoomEvent,
    websockets::{MessageHandler, MessageType, WebSocketMessage},
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a WebSocket message and wait for processing
    pub async fn send_message(&self, connection_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.input_handler
            .handle_message(connection_id, message_json)
            .await;
        sleep(Duration::from_millis(50)).await;
    }

    /// Emit a room event into the setup's room and wait for processing
    pub async fn emit_event(&self, event: RoomEvent) {
        self.event_bus.emit_to_room(&self.room_id, event).await;
        sleep(Duration::from_millis(50)).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Create a room, using the connection id as the username
    pub async fn send_create_room(&self, player: &str) {
        self.send_message(
            player,
            WebSocketMessage::new(MessageType::CreateRoom, json!({ "username": player })),
        )
        .await;
    }

    /// Join a room, using the connection id as the username
    pub async fn send_join_room(&self, player: &str, room_id: &str) {
        self.send_message(
            player,
            WebSocketMessage::new(
                MessageType::JoinRoom,
                json!({ "username": player, "roomId": room_id }),
            ),
        )
        .await;
    }

    /// Send a start game message
    pub async fn send_start_game(&self, player: &str) {
        self.send_message(
            player,
            WebSocketMessage::new(MessageType::StartGame, json!({})),
        )
        .await;
    }

    /// Send a restart game message
    pub async fn send_restart_game(&self, player: &str) {
        self.send_message(
            player,
            WebSocketMessage::new(MessageType::RestartGame, json!({})),
        )
        .await;
    }

    /// Send an eliminate message targeting the given player
    pub async fn send_eliminate(&self, player: &str, target: &str) {
        self.send_message(
            player,
            WebSocketMessage::new(
                MessageType::EliminatePlayer,
                json!({ "roomId": self.room_id, "playerId": target }),
            ),
        )
        .await;
    }
}
