use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::event::RoomEvent;
use crate::room::repository::{EliminateResult, JoinRoomResult, StartGameResult};
use crate::shared::AppState;
use crate::websockets::messages::{
    CreateRoomPayload, EliminatePlayerPayload, JoinRoomPayload, MessageType, WebSocketMessage,
};

use super::socket::{Connection, MessageHandler};

/// Message handler for commands received from the client
///
/// Each command is answered directly to the sender (ack or error); resulting
/// facts are emitted on the event bus, where the room subscriber turns them
/// into broadcasts.
pub struct WebsocketReceiveHandler {
    state: AppState,
}

impl WebsocketReceiveHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn send_to_connection(&self, connection_id: &str, message: WebSocketMessage) {
        match serde_json::to_string(&message) {
            Ok(raw) => {
                self.state
                    .connection_manager
                    .send_to_player(connection_id, &raw)
                    .await;
            }
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to serialize outbound message"
                );
            }
        }
    }

    async fn send_error(&self, connection_id: &str, message: &str) {
        self.send_to_connection(connection_id, WebSocketMessage::error(message.to_string()))
            .await;
    }

    /// Emits a leave request for the room the connection currently occupies,
    /// if any; used when a connection moves to another room
    async fn request_leave_current_room(&self, connection_id: &str) {
        if let Some(entry) = self.state.player_directory.get(connection_id).await {
            if let Some(room_id) = entry.room_id {
                self.state
                    .event_bus
                    .emit_to_room(
                        &room_id,
                        RoomEvent::PlayerLeaveRequested {
                            player: connection_id.to_string(),
                        },
                    )
                    .await;
            }
        }
    }

    async fn handle_create_room(&self, connection_id: &str, payload: CreateRoomPayload) {
        let username = payload.username.trim();
        if username.is_empty() {
            self.send_error(connection_id, "Username is required").await;
            return;
        }

        self.request_leave_current_room(connection_id).await;

        let room = match self
            .state
            .room_service
            .create_room(connection_id, username)
            .await
        {
            Ok(room) => room,
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "Failed to create room");
                self.send_error(connection_id, "Failed to create room").await;
                return;
            }
        };

        // Subscribe before announcing so the broadcast is not missed
        self.state.subscriptions.ensure_subscribed(&room.id).await;
        self.state
            .player_directory
            .assign(connection_id, username.to_string(), room.id.clone())
            .await;

        self.send_to_connection(connection_id, WebSocketMessage::room_created(room.id.clone()))
            .await;

        self.state
            .event_bus
            .emit_to_room(
                &room.id,
                RoomEvent::PlayerJoined {
                    player: connection_id.to_string(),
                },
            )
            .await;
    }

    async fn handle_join_room(&self, connection_id: &str, payload: JoinRoomPayload) {
        let username = payload.username.trim();
        let room_id = payload.room_id.trim();
        if username.is_empty() || room_id.is_empty() {
            self.send_error(connection_id, "Username and room code are required")
                .await;
            return;
        }

        match self.state.room_service.get_room(room_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.send_error(connection_id, "Room not found").await;
                return;
            }
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "Failed to look up room");
                self.send_error(connection_id, "Failed to join room").await;
                return;
            }
        }

        // Leave the previous room unless rejoining the same one
        let current_room = self
            .state
            .player_directory
            .get(connection_id)
            .await
            .and_then(|entry| entry.room_id);
        if current_room.as_deref() != Some(room_id) {
            self.request_leave_current_room(connection_id).await;
        }

        let result = match self
            .state
            .room_service
            .join_room(room_id, connection_id, username)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "Failed to join room");
                self.send_error(connection_id, "Failed to join room").await;
                return;
            }
        };

        match result {
            JoinRoomResult::Success(room) => {
                self.state.subscriptions.ensure_subscribed(&room.id).await;
                self.state
                    .player_directory
                    .assign(connection_id, username.to_string(), room.id.clone())
                    .await;

                self.send_to_connection(
                    connection_id,
                    WebSocketMessage::room_joined(room.id.clone()),
                )
                .await;

                self.state
                    .event_bus
                    .emit_to_room(
                        &room.id,
                        RoomEvent::PlayerJoined {
                            player: connection_id.to_string(),
                        },
                    )
                    .await;
            }
            JoinRoomResult::RoomNotFound => {
                self.send_error(connection_id, "Room not found").await;
            }
        }
    }

    async fn handle_start_game(&self, connection_id: &str, action: MessageType) {
        let restarting = action == MessageType::RestartGame;

        let room_id = match self
            .state
            .player_directory
            .get(connection_id)
            .await
            .and_then(|entry| entry.room_id)
        {
            Some(room_id) => room_id,
            None => {
                self.send_error(connection_id, "You have not joined a room")
                    .await;
                return;
            }
        };

        let result = match self
            .state
            .game_service
            .start_game(&room_id, connection_id)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "Failed to start game");
                self.send_error(connection_id, "Failed to start game").await;
                return;
            }
        };

        match result {
            StartGameResult::Started(_) => {
                self.send_to_connection(connection_id, WebSocketMessage::ack(action))
                    .await;

                self.state
                    .event_bus
                    .emit_to_room(
                        &room_id,
                        RoomEvent::GameStarted {
                            started_by: connection_id.to_string(),
                        },
                    )
                    .await;
            }
            StartGameResult::NotHost => {
                let message = if restarting {
                    "Only the host can restart the game"
                } else {
                    "Only the host can start the game"
                };
                self.send_error(connection_id, message).await;
            }
            StartGameResult::RoomNotFound => {
                self.send_error(connection_id, "Room not found").await;
            }
        }
    }

    async fn handle_eliminate_player(&self, connection_id: &str, payload: EliminatePlayerPayload) {
        if payload.room_id.is_empty() || payload.player_id.is_empty() {
            self.send_error(connection_id, "Missing required fields")
                .await;
            return;
        }

        let result = match self
            .state
            .game_service
            .eliminate_player(&payload.room_id, connection_id, &payload.player_id)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "Failed to eliminate player");
                self.send_error(connection_id, "Failed to eliminate player")
                    .await;
                return;
            }
        };

        match result {
            EliminateResult::Eliminated { room, game_over } => {
                self.send_to_connection(
                    connection_id,
                    WebSocketMessage::ack(MessageType::EliminatePlayer),
                )
                .await;

                let event = if game_over {
                    RoomEvent::GameOver {
                        winner: room.winner.clone(),
                    }
                } else {
                    RoomEvent::PlayerEliminated {
                        player: payload.player_id.clone(),
                    }
                };
                self.state.event_bus.emit_to_room(&payload.room_id, event).await;
            }
            EliminateResult::AlreadyEliminated => {
                // Idempotent success, nothing to broadcast
                self.send_to_connection(
                    connection_id,
                    WebSocketMessage::ack(MessageType::EliminatePlayer),
                )
                .await;
            }
            EliminateResult::NotSelf => {
                self.send_error(connection_id, "You can only eliminate yourself")
                    .await;
            }
            EliminateResult::PlayerNotFound => {
                self.send_error(connection_id, "Player not found").await;
            }
            EliminateResult::NotPlaying => {
                self.send_error(connection_id, "Game has not started").await;
            }
            EliminateResult::RoomNotFound => {
                self.send_error(connection_id, "Room not found").await;
            }
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                self.send_error(connection_id, "Invalid message format").await;
                return;
            }
        };

        match ws_message.message_type {
            MessageType::CreateRoom => {
                match serde_json::from_value::<CreateRoomPayload>(ws_message.payload) {
                    Ok(payload) => self.handle_create_room(connection_id, payload).await,
                    Err(_) => self.send_error(connection_id, "Username is required").await,
                }
            }
            MessageType::JoinRoom => {
                match serde_json::from_value::<JoinRoomPayload>(ws_message.payload) {
                    Ok(payload) => self.handle_join_room(connection_id, payload).await,
                    Err(_) => {
                        self.send_error(connection_id, "Username and room code are required")
                            .await
                    }
                }
            }
            MessageType::StartGame | MessageType::RestartGame => {
                self.handle_start_game(connection_id, ws_message.message_type.clone())
                    .await
            }
            MessageType::EliminatePlayer => {
                match serde_json::from_value::<EliminatePlayerPayload>(ws_message.payload) {
                    Ok(payload) => self.handle_eliminate_player(connection_id, payload).await,
                    Err(_) => {
                        self.send_error(connection_id, "Missing required fields")
                            .await
                    }
                }
            }
            _ => {
                debug!(
                    message_type = ?ws_message.message_type,
                    "Unhandled message type"
                );
            }
        }
    }
}

/// WebSocket endpoint
/// GET /ws - each accepted socket gets a fresh connection id
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();

    info!(
        connection_id = %connection_id,
        "WebSocket connection established"
    );

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.clone()));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(
                connection_id = %connection_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: remove from connection manager and emit disconnect event
    app_state
        .connection_manager
        .remove_connection(&connection_id)
        .await;

    if let Some(entry) = app_state.player_directory.remove(&connection_id).await {
        if let Some(room_id) = entry.room_id {
            app_state
                .event_bus
                .emit_to_room(
                    &room_id,
                    RoomEvent::PlayerDisconnected {
                        player: connection_id.clone(),
                    },
                )
                .await;

            info!(
                connection_id = %connection_id,
                room_id = %room_id,
                "WebSocket disconnect event emitted"
            );
        }
    }
}
