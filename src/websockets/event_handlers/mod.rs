pub use connection_events::ConnectionEventHandlers;
pub use game_events::GameEventHandlers;
pub use room_events::RoomEventHandlers;

mod connection_events;
mod game_events;
mod room_events;
pub mod shared;
