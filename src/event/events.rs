use serde::{Deserialize, Serialize};

/// Events that can occur in a lobby room
///
/// Events represent facts about things that have already happened, plus the
/// two connection-level requests (leave, disconnect) that are resolved by the
/// room subscriber rather than the receive handler. They are used to
/// communicate state changes between different parts of the system without
/// tight coupling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    /// A player has joined the room (also emitted for the creator)
    PlayerJoined { player: String },

    /// A player has been removed from the room
    PlayerLeft {
        player: String,
        /// Connection id of the newly promoted host, if the host left
        new_host: Option<String>,
    },

    /// A player asked to leave the room (e.g. switching to another room)
    PlayerLeaveRequested { player: String },

    /// A player's WebSocket connection dropped
    PlayerDisconnected { player: String },

    /// A round has started (initial start or restart)
    GameStarted { started_by: String },

    /// A player has eliminated themselves without ending the round
    PlayerEliminated { player: String },

    /// The round has ended; winner is None when no alive player remains
    GameOver { winner: Option<String> },
}

impl RoomEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::PlayerJoined { .. } => "player_joined",
            RoomEvent::PlayerLeft { .. } => "player_left",
            RoomEvent::PlayerLeaveRequested { .. } => "player_leave_requested",
            RoomEvent::PlayerDisconnected { .. } => "player_disconnected",
            RoomEvent::GameStarted { .. } => "game_started",
            RoomEvent::PlayerEliminated { .. } => "player_eliminated",
            RoomEvent::GameOver { .. } => "game_over",
        }
    }
}
