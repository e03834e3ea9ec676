use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::{PlayerModel, PlayerStatus, RoomModel, RoomStatus};
use crate::game::KeywordPool;
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Joined the room (or was already in it), returns updated room data
    Success(RoomModel),
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to leave a room
#[derive(Debug, Clone)]
pub enum LeaveRoomResult {
    /// Successfully left the room, returns updated room data
    Success {
        room: RoomModel,
        /// Connection id of the promoted host, when the host left
        new_host: Option<String>,
        /// True when the departure resolved the round's winner
        game_over: bool,
    },
    /// Room was deleted because no players remain
    RoomDeleted,
    /// Player was not in the room
    PlayerNotInRoom,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to start (or restart) a round
#[derive(Debug, Clone)]
pub enum StartGameResult {
    /// Round started, returns updated room data
    Started(RoomModel),
    /// Requester is not in the room or not its host
    NotHost,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to eliminate a player
#[derive(Debug, Clone)]
pub enum EliminateResult {
    /// Player eliminated; game_over is true when a winner was resolved
    Eliminated { room: RoomModel, game_over: bool },
    /// Target was already eliminated - treated as success with no state change
    AlreadyEliminated,
    /// Players may only eliminate themselves
    NotSelf,
    /// Target is not in the room
    PlayerNotFound,
    /// Room is not in playing status
    NotPlaying,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room repository operations
///
/// Compound operations are atomic: capacity for races is small in a
/// single-process server, but join/leave/start/eliminate all read and write
/// the same room, so each holds the map lock for the whole mutation,
/// including host reassignment and winner resolution.
#[async_trait]
pub trait RoomRepository {
    /// Creates a room with a generated 4-digit id unique among live rooms
    async fn create_room(&self, host: PlayerModel) -> Result<RoomModel, AppError>;

    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically adds a player to a room
    ///
    /// Joining a room the player is already in is idempotent. The caller
    /// pre-draws `keyword_if_playing`; it is assigned only when the room is
    /// mid-round.
    async fn try_join_room(
        &self,
        room_id: &str,
        player: PlayerModel,
        keyword_if_playing: String,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically removes a player, reassigning the host flag and resolving
    /// the winner as needed; deletes the room when it empties
    async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError>;

    /// Atomically starts (or restarts) a round, dealing each player a keyword
    async fn start_game(
        &self,
        room_id: &str,
        requester_id: &str,
        keywords: &KeywordPool,
    ) -> Result<StartGameResult, AppError>;

    /// Atomically marks a player eliminated and resolves the winner
    async fn eliminate_player(
        &self,
        room_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<EliminateResult, AppError>;
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    fn generate_room_id(rooms: &HashMap<String, RoomModel>) -> String {
        let mut rng = rand::rng();
        loop {
            let candidate = rng.random_range(1000..10000).to_string();
            if !rooms.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, host))]
    async fn create_room(&self, host: PlayerModel) -> Result<RoomModel, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room_id = Self::generate_room_id(&rooms);
        let room = RoomModel::new(room_id.clone(), host);
        rooms.insert(room_id.clone(), room.clone());

        debug!(room_id = %room_id, "Room created in memory");
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let rooms = self.rooms.lock().unwrap();
        let room = rooms.get(room_id).cloned();

        match &room {
            Some(_) => debug!(room_id = %room_id, "Room found in memory"),
            None => debug!(room_id = %room_id, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms.values().cloned().collect())
    }

    #[instrument(skip(self, player, keyword_if_playing))]
    async fn try_join_room(
        &self,
        room_id: &str,
        mut player: PlayerModel,
        keyword_if_playing: String,
    ) -> Result<JoinRoomResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        // Rejoining the current room is a no-op
        if room.has_player(&player.connection_id) {
            debug!(
                room_id = %room_id,
                connection_id = %player.connection_id,
                "Player already in room"
            );
            return Ok(JoinRoomResult::Success(room.clone()));
        }

        player.is_host = room.players.is_empty();
        if room.status == RoomStatus::Playing {
            player.keyword = Some(keyword_if_playing);
        }
        room.players.push(player);

        let updated_room = room.clone();
        info!(
            room_id = %room_id,
            new_player_count = updated_room.player_count(),
            "Player joined room (atomic)"
        );

        Ok(JoinRoomResult::Success(updated_room))
    }

    #[instrument(skip(self))]
    async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(LeaveRoomResult::RoomNotFound);
            }
        };

        if !room.has_player(connection_id) {
            debug!(
                room_id = %room_id,
                connection_id = %connection_id,
                "Player not in room"
            );
            return Ok(LeaveRoomResult::PlayerNotInRoom);
        }

        room.players.retain(|p| p.connection_id != connection_id);

        if room.players.is_empty() {
            info!(room_id = %room_id, "Room is now empty, deleting");
            rooms.remove(room_id);
            return Ok(LeaveRoomResult::RoomDeleted);
        }

        // Move the host flag to the first remaining player if the host left
        let mut new_host = None;
        if room.host().is_none() {
            let promoted = &mut room.players[0];
            promoted.is_host = true;
            new_host = Some(promoted.connection_id.clone());
            info!(
                room_id = %room_id,
                old_host = %connection_id,
                new_host = %promoted.connection_id,
                "Host left, assigning new host"
            );
        }

        let game_over = if room.status == RoomStatus::Playing {
            room.resolve_winner()
        } else {
            false
        };

        let updated_room = room.clone();
        info!(
            room_id = %room_id,
            connection_id = %connection_id,
            new_player_count = updated_room.player_count(),
            game_over = game_over,
            "Player left room (atomic)"
        );

        Ok(LeaveRoomResult::Success {
            room: updated_room,
            new_host,
            game_over,
        })
    }

    #[instrument(skip(self, keywords))]
    async fn start_game(
        &self,
        room_id: &str,
        requester_id: &str,
        keywords: &KeywordPool,
    ) -> Result<StartGameResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(StartGameResult::RoomNotFound);
            }
        };

        if !room.is_host(requester_id) {
            warn!(
                room_id = %room_id,
                requester_id = %requester_id,
                "Non-host attempted to start the game"
            );
            return Ok(StartGameResult::NotHost);
        }

        room.prepare_for_round(|| keywords.draw());

        let updated_room = room.clone();
        info!(
            room_id = %room_id,
            player_count = updated_room.player_count(),
            "Round started (atomic)"
        );

        Ok(StartGameResult::Started(updated_room))
    }

    #[instrument(skip(self))]
    async fn eliminate_player(
        &self,
        room_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<EliminateResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(EliminateResult::RoomNotFound);
            }
        };

        if room.status != RoomStatus::Playing {
            debug!(room_id = %room_id, "Room is not playing");
            return Ok(EliminateResult::NotPlaying);
        }

        if requester_id != target_id {
            warn!(
                room_id = %room_id,
                requester_id = %requester_id,
                target_id = %target_id,
                "Player attempted to eliminate someone else"
            );
            return Ok(EliminateResult::NotSelf);
        }

        let target = match room.get_player_mut(target_id) {
            Some(player) => player,
            None => {
                debug!(room_id = %room_id, target_id = %target_id, "Target not in room");
                return Ok(EliminateResult::PlayerNotFound);
            }
        };

        if target.status == PlayerStatus::Eliminated {
            debug!(room_id = %room_id, target_id = %target_id, "Target already eliminated");
            return Ok(EliminateResult::AlreadyEliminated);
        }

        target.status = PlayerStatus::Eliminated;
        let game_over = room.resolve_winner();

        let updated_room = room.clone();
        info!(
            room_id = %room_id,
            target_id = %target_id,
            game_over = game_over,
            "Player eliminated (atomic)"
        );

        Ok(EliminateResult::Eliminated {
            room: updated_room,
            game_over,
        })
    }
}
