use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Lifecycle of a room: players gather while waiting, then a round runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerStatus {
    Alive,
    Eliminated,
}

/// A player inside a room, keyed by their WebSocket connection id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerModel {
    pub connection_id: String,
    pub username: String,
    pub is_host: bool,
    pub keyword: Option<String>,
    pub status: PlayerStatus,
}

impl PlayerModel {
    pub fn new(connection_id: String, username: String, is_host: bool) -> Self {
        Self {
            connection_id,
            username,
            is_host,
            keyword: None,
            status: PlayerStatus::Alive,
        }
    }
}

/// In-memory model for a game room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String, // 4-digit code, unique among live rooms
    pub status: RoomStatus,
    pub winner: Option<String>,
    pub players: Vec<PlayerModel>,
}

impl RoomModel {
    /// Creates a new waiting room with the given id and its creator as host
    pub fn new(id: String, host: PlayerModel) -> Self {
        Self {
            id,
            status: RoomStatus::Waiting,
            winner: None,
            players: vec![host],
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn has_player(&self, connection_id: &str) -> bool {
        self.players.iter().any(|p| p.connection_id == connection_id)
    }

    pub fn get_player(&self, connection_id: &str) -> Option<&PlayerModel> {
        self.players.iter().find(|p| p.connection_id == connection_id)
    }

    pub fn get_player_mut(&mut self, connection_id: &str) -> Option<&mut PlayerModel> {
        self.players
            .iter_mut()
            .find(|p| p.connection_id == connection_id)
    }

    /// Connection ids of all players, for broadcasting
    pub fn connection_ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.connection_id.clone()).collect()
    }

    pub fn host(&self) -> Option<&PlayerModel> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn is_host(&self, connection_id: &str) -> bool {
        self.get_player(connection_id).is_some_and(|p| p.is_host)
    }

    fn alive_players(&self) -> Vec<&PlayerModel> {
        self.players
            .iter()
            .filter(|p| p.status == PlayerStatus::Alive)
            .collect()
    }

    /// Puts the room into a fresh round: playing status, no winner, every
    /// player alive with a newly drawn keyword
    pub fn prepare_for_round(&mut self, mut draw_keyword: impl FnMut() -> String) {
        self.status = RoomStatus::Playing;
        self.winner = None;
        for player in &mut self.players {
            player.status = PlayerStatus::Alive;
            player.keyword = Some(draw_keyword());
        }
    }

    /// Resolves the winner if at most one alive player remains
    ///
    /// Sets `winner` to the remaining alive player's username (or None when
    /// nobody is alive) and returns true; returns false when the round
    /// continues.
    pub fn resolve_winner(&mut self) -> bool {
        let alive = self.alive_players();
        if alive.len() <= 1 {
            self.winner = alive.first().map(|p| p.username.clone());
            true
        } else {
            false
        }
    }
}
