use std::sync::Arc;
use tracing::info;

use crate::{
    event::{EventBus, RoomEvent, RoomEventError},
    room::{repository::LeaveRoomResult, service::RoomService},
};

pub struct ConnectionEventHandlers {
    room_service: Arc<RoomService>,
    event_bus: EventBus,
}

impl ConnectionEventHandlers {
    pub fn new(room_service: Arc<RoomService>, event_bus: EventBus) -> Self {
        Self {
            room_service,
            event_bus,
        }
    }

    /// Removes the player from the room and emits the resulting fact:
    /// GameOver when the departure resolved the round, PlayerLeft otherwise.
    /// Deleting the last player tears down the room's event channel.
    pub async fn handle_leave_request(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<(), RoomEventError> {
        info!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Processing leave request"
        );

        match self
            .room_service
            .leave_room(room_id, connection_id)
            .await
        {
            Ok(LeaveRoomResult::Success {
                room,
                new_host,
                game_over,
            }) => {
                let event = if game_over {
                    RoomEvent::GameOver {
                        winner: room.winner.clone(),
                    }
                } else {
                    RoomEvent::PlayerLeft {
                        player: connection_id.to_string(),
                        new_host,
                    }
                };
                self.event_bus.emit_to_room(room_id, event).await;

                info!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    "Leave request processed successfully"
                );
            }
            Ok(LeaveRoomResult::RoomDeleted) => {
                self.event_bus.remove_room(room_id).await;

                info!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    "Room deleted after player left"
                );
            }
            Ok(_) => {
                info!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    "Player was not in room or room not found"
                );
            }
            Err(e) => {
                return Err(RoomEventError::HandlerError(format!(
                    "Failed to process leave: {}",
                    e
                )));
            }
        }

        Ok(())
    }
}
