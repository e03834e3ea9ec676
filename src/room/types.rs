use serde::{Deserialize, Serialize};

use super::models::{RoomModel, RoomStatus};

/// Response for the room listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub status: RoomStatus,
    pub player_count: usize,
}

impl From<&RoomModel> for RoomSummary {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            status: room.status,
            player_count: room.player_count(),
        }
    }
}
