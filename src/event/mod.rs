// Event-driven architecture components
//
// This module provides the core infrastructure for routing room events
// between the command side (WebSocket receive handler) and the broadcast
// side (room subscribers).

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::RoomEvent;
pub use room_handler::{RoomEventError, RoomEventHandler};
pub use room_subscription::RoomSubscription;

// Internal modules
mod bus;
mod events;
mod room_handler;
mod room_subscription;
