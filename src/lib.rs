// Library crate for the gamehub lobby server
// This file exposes the public API for integration tests

pub mod event;
pub mod game;
pub mod player;
pub mod room;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use event::{EventBus, RoomEvent, RoomEventHandler, RoomSubscription};
pub use game::{GameService, KeywordPool};
pub use room::{models::RoomModel, repository::RoomRepository, service::RoomService};
pub use shared::AppError;
pub use websockets::{
    ConnectionManager, MessageHandler, MessageType, RoomSubscriptions, WebSocketMessage,
    WebSocketRoomSubscriber, WebsocketReceiveHandler,
};
