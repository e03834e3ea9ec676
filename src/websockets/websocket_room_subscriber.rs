use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{EventBus, RoomEvent, RoomEventError, RoomEventHandler},
    room::service::RoomService,
    websockets::connection_manager::ConnectionManager,
};

use super::event_handlers::{ConnectionEventHandlers, GameEventHandlers, RoomEventHandlers};

/// WebSocket-specific room event handler
///
/// Handles room events by delegating to specialized event handlers:
/// - RoomEventHandlers: PlayerJoined, PlayerLeft
/// - GameEventHandlers: GameStarted, PlayerEliminated, GameOver
/// - ConnectionEventHandlers: PlayerLeaveRequested, PlayerDisconnected
pub struct WebSocketRoomSubscriber {
    room_handlers: RoomEventHandlers,
    game_handlers: GameEventHandlers,
    connection_handlers: ConnectionEventHandlers,
}

#[async_trait]
impl RoomEventHandler for WebSocketRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            event = event.event_type(),
            "Handling room event for WebSocket connections"
        );

        match event {
            RoomEvent::PlayerJoined { player: _ } => {
                self.room_handlers.handle_player_joined(room_id).await
            }
            RoomEvent::PlayerLeft { player, new_host } => {
                self.room_handlers
                    .handle_player_left(room_id, &player, new_host)
                    .await
            }
            RoomEvent::PlayerLeaveRequested { player } => {
                self.connection_handlers
                    .handle_leave_request(room_id, &player)
                    .await
            }
            RoomEvent::PlayerDisconnected { player } => {
                self.connection_handlers
                    .handle_leave_request(room_id, &player)
                    .await
            }
            RoomEvent::GameStarted { started_by } => {
                self.game_handlers
                    .handle_game_started(room_id, &started_by)
                    .await
            }
            RoomEvent::PlayerEliminated { player } => {
                self.game_handlers
                    .handle_player_eliminated(room_id, &player)
                    .await
            }
            RoomEvent::GameOver { winner } => {
                self.game_handlers.handle_game_over(room_id, winner).await
            }
        }
    }

    fn handler_name(&self) -> &'static str {
        "WebSocketRoomSubscriber"
    }
}

impl WebSocketRoomSubscriber {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
    ) -> Self {
        let room_handlers = RoomEventHandlers::new(
            Arc::clone(&room_service),
            Arc::clone(&connection_manager),
        );

        let game_handlers = GameEventHandlers::new(
            Arc::clone(&room_service),
            Arc::clone(&connection_manager),
        );

        let connection_handlers =
            ConnectionEventHandlers::new(Arc::clone(&room_service), event_bus);

        Self {
            room_handlers,
            game_handlers,
            connection_handlers,
        }
    }
}
