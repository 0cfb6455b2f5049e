//! Change notification gateway. Pushes events to WebSocket listeners.

pub mod actix_ws;
pub mod events;
pub mod protocol;

pub use events::EventBroadcaster;
