use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::event::EventBus;
use crate::game::GameService;
use crate::player::PlayerDirectory;
use crate::room::service::RoomService;
use crate::websockets::{ConnectionManager, RoomSubscriptions};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<RoomService>,
    pub game_service: Arc<GameService>,
    pub player_directory: Arc<dyn PlayerDirectory>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub event_bus: EventBus,
    pub subscriptions: Arc<RoomSubscriptions>,
}

impl AppState {
    pub fn new(
        room_service: Arc<RoomService>,
        game_service: Arc<GameService>,
        player_directory: Arc<dyn PlayerDirectory>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
        subscriptions: Arc<RoomSubscriptions>,
    ) -> Self {
        Self {
            room_service,
            game_service,
            player_directory,
            connection_manager,
            event_bus,
            subscriptions,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::StorageError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
