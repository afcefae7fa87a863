//! WebSocket layer: the connection task and the inbound message handler.
//!
//! The connection targets `/ws/` on the page host and is receive-only:
//! the listener never sends application messages.

pub mod connection;
pub mod handler;

pub use handler::MessageHandler;
