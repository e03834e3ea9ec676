use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{PlayerModel, RoomModel},
    repository::{JoinRoomResult, LeaveRoomResult, RoomRepository},
    types::RoomSummary,
};
use crate::{game::KeywordPool, shared::AppError};

/// Service for room membership business logic
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    keyword_pool: Arc<KeywordPool>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        keyword_pool: Arc<KeywordPool>,
    ) -> Self {
        Self {
            repository,
            keyword_pool,
        }
    }

    /// Creates a new room with the requester as host and sole player
    #[instrument(skip(self))]
    pub async fn create_room(
        &self,
        connection_id: &str,
        username: &str,
    ) -> Result<RoomModel, AppError> {
        let host = PlayerModel::new(connection_id.to_string(), username.to_string(), true);
        let room = self.repository.create_room(host).await?;

        info!(
            room_id = %room.id,
            username = %username,
            "Room created successfully"
        );

        Ok(room)
    }

    /// Joins an existing room; a keyword is pre-drawn in case the room is
    /// mid-round
    #[instrument(skip(self))]
    pub async fn join_room(
        &self,
        room_id: &str,
        connection_id: &str,
        username: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let player = PlayerModel::new(connection_id.to_string(), username.to_string(), false);
        let keyword = self.keyword_pool.draw();

        let result = self.repository.try_join_room(room_id, player, keyword).await?;

        match &result {
            JoinRoomResult::Success(room) => {
                info!(
                    room_id = %room_id,
                    username = %username,
                    player_count = room.player_count(),
                    "Player joined room"
                );
            }
            JoinRoomResult::RoomNotFound => {
                debug!(room_id = %room_id, "Join failed, room not found");
            }
        }

        Ok(result)
    }

    /// Removes a player from a room
    #[instrument(skip(self))]
    pub async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let result = self.repository.leave_room(room_id, connection_id).await?;

        match &result {
            LeaveRoomResult::Success { room, new_host, .. } => {
                info!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    new_player_count = room.player_count(),
                    new_host = ?new_host,
                    "Player left room"
                );
            }
            LeaveRoomResult::RoomDeleted => {
                info!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    "Room deleted after last player left"
                );
            }
            LeaveRoomResult::PlayerNotInRoom => {
                debug!(
                    room_id = %room_id,
                    connection_id = %connection_id,
                    "Player was not in room"
                );
            }
            LeaveRoomResult::RoomNotFound => {
                debug!(room_id = %room_id, "Room not found");
            }
        }

        Ok(result)
    }

    /// Gets the full room model for internal use (WebSocket handlers, etc.)
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        self.repository.get_room(room_id).await
    }

    /// Lists all live rooms as summaries
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, AppError> {
        let rooms = self.repository.list_rooms().await?;

        info!(room_count = rooms.len(), "Rooms retrieved successfully");

        Ok(rooms.iter().map(RoomSummary::from).collect())
    }
}
