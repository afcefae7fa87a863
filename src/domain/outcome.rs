//! Result of handling one inbound message.

use serde::Serialize;

/// What the message handler did with one text frame.
///
/// Every variant is a normal return: the handler never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOutcome {
    /// The display surface content was replaced.
    Rendered,
    /// No display surface was present; nothing was written.
    NoSurface,
    /// The payload was not valid JSON and was discarded.
    Dropped,
    /// Surface lookup or write failed; the failure was logged.
    RenderFailed,
}
