use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    event::RoomEventError,
    room::service::RoomService,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

pub struct GameEventHandlers {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl GameEventHandlers {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }

    pub async fn handle_game_started(
        &self,
        room_id: &str,
        started_by: &str,
    ) -> Result<(), RoomEventError> {
        info!(
            room_id = %room_id,
            started_by = %started_by,
            "Handling game started event"
        );

        let room = RoomQueryUtils::get_room_or_error(&self.room_service, room_id).await?;

        let ws_message = WebSocketMessage::game_started(&room);
        MessageBroadcaster::broadcast_to_players(
            &self.connection_manager,
            &room.connection_ids(),
            &ws_message,
        )
        .await?;

        info!(
            room_id = %room_id,
            players_notified = room.player_count(),
            "Game started notification sent to all room players"
        );

        Ok(())
    }

    pub async fn handle_player_eliminated(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Handling player eliminated event"
        );

        let room = RoomQueryUtils::get_room_or_error(&self.room_service, room_id).await?;

        let ws_message = WebSocketMessage::room_update(&room);
        MessageBroadcaster::broadcast_to_players(
            &self.connection_manager,
            &room.connection_ids(),
            &ws_message,
        )
        .await?;

        Ok(())
    }

    pub async fn handle_game_over(
        &self,
        room_id: &str,
        winner: Option<String>,
    ) -> Result<(), RoomEventError> {
        info!(
            room_id = %room_id,
            winner = ?winner,
            "Handling game over event"
        );

        let room = RoomQueryUtils::get_room_or_error(&self.room_service, room_id).await?;

        let ws_message = WebSocketMessage::game_over(&room);
        MessageBroadcaster::broadcast_to_players(
            &self.connection_manager,
            &room.connection_ids(),
            &ws_message,
        )
        .await?;

        info!(
            room_id = %room_id,
            players_notified = room.player_count(),
            "Game over notification sent to all room players"
        );

        Ok(())
    }
}
