use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    event::RoomEventError,
    room::service::RoomService,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

pub struct RoomEventHandlers {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl RoomEventHandlers {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }

    pub async fn handle_player_joined(&self, room_id: &str) -> Result<(), RoomEventError> {
        debug!(room_id = %room_id, "Handling player joined event");

        let room = RoomQueryUtils::get_room_or_error(&self.room_service, room_id).await?;

        let ws_message = WebSocketMessage::room_update(&room);
        MessageBroadcaster::broadcast_to_players(
            &self.connection_manager,
            &room.connection_ids(),
            &ws_message,
        )
        .await?;

        debug!(
            room_id = %room_id,
            players_notified = room.player_count(),
            "Room update sent after join"
        );

        Ok(())
    }

    pub async fn handle_player_left(
        &self,
        room_id: &str,
        connection_id: &str,
        new_host: Option<String>,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Handling player left event"
        );

        let room = match RoomQueryUtils::get_room_if_exists(&self.room_service, room_id).await? {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room was deleted, no notifications needed");
                return Ok(());
            }
        };

        if let Some(new_host) = &new_host {
            info!(
                room_id = %room_id,
                old_host = %connection_id,
                new_host = %new_host,
                "Host reassigned after departure"
            );
        }

        let ws_message = WebSocketMessage::room_update(&room);
        MessageBroadcaster::broadcast_to_players(
            &self.connection_manager,
            &room.connection_ids(),
            &ws_message,
        )
        .await?;

        Ok(())
    }
}
