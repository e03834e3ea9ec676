pub use message_broadcast::MessageBroadcaster;
pub use room_queries::RoomQueryUtils;

mod message_broadcast;
mod room_queries;
