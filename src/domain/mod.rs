//! Domain layer: endpoint resolution, payloads, connection state, stats.
//!
//! This module contains the listener-side model: where the stream lives
//! ([`Endpoint`]), what arrives on it ([`Payload`]), the transport
//! lifecycle ([`ConnectionState`]) and diagnostic counters.

pub mod connection_state;
pub mod endpoint;
pub mod outcome;
pub mod payload;
pub mod stats;

pub use connection_state::ConnectionState;
pub use endpoint::{Endpoint, PageLocation, PageScheme, STREAM_PATH};
pub use outcome::MessageOutcome;
pub use payload::{Payload, PayloadKind};
pub use stats::{ListenerStats, StatsSnapshot};
