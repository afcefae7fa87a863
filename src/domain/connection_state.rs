//! Transport lifecycle of a listener connection.

use std::fmt;

use serde::Serialize;

/// Lifecycle state of the connection.
///
/// ```text
/// Connecting ──► Open ──► Closed
///      │           │
///      └───────────┴────► Errored
/// ```
///
/// `Closed` and `Errored` are terminal: the listener never reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Frames are being delivered to the handler.
    Open,
    /// The stream ended normally or the owner closed it.
    Closed,
    /// The handshake or the stream failed.
    Errored,
}

impl ConnectionState {
    /// Returns `true` once no further frames can be delivered.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!ConnectionState::Connecting.is_terminal());
        assert!(!ConnectionState::Open.is_terminal());
        assert!(ConnectionState::Closed.is_terminal());
        assert!(ConnectionState::Errored.is_terminal());
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(ConnectionState::Errored.to_string(), "errored");
        assert_eq!(
            serde_json::to_string(&ConnectionState::Open).ok().as_deref(),
            Some("\"open\"")
        );
    }
}
