use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::room::models::{PlayerModel, PlayerStatus, RoomModel, RoomStatus};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    CreateRoom,
    JoinRoom,
    StartGame,
    EliminatePlayer,
    RestartGame,

    // Server -> Client
    RoomCreated,
    RoomJoined,
    Ack,
    Error,
    RoomUpdate,
    GameStarted,
    GameOver,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub player_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
///
/// Field names are camelCase on the wire to match the browser client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub username: String,
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminatePlayerPayload {
    pub room_id: String,
    pub player_id: String,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreatedPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckPayload {
    pub action: MessageType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Snapshot of one player as broadcast to the room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatePayload {
    pub player_id: String,
    pub username: String,
    pub is_host: bool,
    pub keyword: Option<String>,
    pub status: PlayerStatus,
}

impl From<&PlayerModel> for PlayerStatePayload {
    fn from(player: &PlayerModel) -> Self {
        Self {
            player_id: player.connection_id.clone(),
            username: player.username.clone(),
            is_host: player.is_host,
            keyword: player.keyword.clone(),
            status: player.status,
        }
    }
}

/// Full room snapshot carried by ROOM_UPDATE, GAME_STARTED and GAME_OVER
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatePayload {
    pub room_id: String,
    pub status: RoomStatus,
    pub winner: Option<String>,
    pub players: Vec<PlayerStatePayload>,
}

impl From<&RoomModel> for RoomStatePayload {
    fn from(room: &RoomModel) -> Self {
        Self {
            room_id: room.id.clone(),
            status: room.status,
            winner: room.winner.clone(),
            players: room.players.iter().map(PlayerStatePayload::from).collect(),
        }
    }
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                player_id: None,
            }),
        }
    }

    /// Create a ROOM_CREATED message
    pub fn room_created(room_id: String) -> Self {
        let payload = RoomCreatedPayload { room_id };
        Self::new(
            MessageType::RoomCreated,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a ROOM_JOINED message
    pub fn room_joined(room_id: String) -> Self {
        let payload = RoomJoinedPayload { room_id };
        Self::new(
            MessageType::RoomJoined,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create an ACK message acknowledging the given client action
    pub fn ack(action: MessageType) -> Self {
        let payload = AckPayload { action };
        Self::new(MessageType::Ack, serde_json::to_value(payload).unwrap())
    }

    /// Create an ERROR message
    pub fn error(message: String) -> Self {
        let payload = ErrorPayload { message };
        Self::new(MessageType::Error, serde_json::to_value(payload).unwrap())
    }

    /// Create a ROOM_UPDATE message
    pub fn room_update(room: &RoomModel) -> Self {
        let payload = RoomStatePayload::from(room);
        Self::new(
            MessageType::RoomUpdate,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GAME_STARTED message
    pub fn game_started(room: &RoomModel) -> Self {
        let payload = RoomStatePayload::from(room);
        Self::new(
            MessageType::GameStarted,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GAME_OVER message
    pub fn game_over(room: &RoomModel) -> Self {
        let payload = RoomStatePayload::from(room);
        Self::new(
            MessageType::GameOver,
            serde_json::to_value(payload).unwrap(),
        )
    }
}
