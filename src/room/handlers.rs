use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::types::RoomSummary;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all live rooms
///
/// GET /rooms
/// Returns array of room summaries (id, status, player count)
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = state.room_service.list_rooms().await?;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}
