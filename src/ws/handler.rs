//! Inbound message handler.
//!
//! Turns one text frame into at most one display update. Nothing in here
//! returns an error to the connection loop: decode failures are dropped,
//! render failures are logged, both reported as a [`MessageOutcome`].
//! A display host or surface that panics is treated as a render failure.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::display::DisplayHost;
use crate::domain::{MessageOutcome, Payload};
use crate::error::RenderError;

/// Handles inbound frames for one listener.
#[derive(Debug, Clone)]
pub struct MessageHandler {
    host: Arc<dyn DisplayHost>,
    surface_id: String,
}

impl MessageHandler {
    /// Creates a handler rendering into the surface `surface_id` of `host`.
    #[must_use]
    pub fn new(host: Arc<dyn DisplayHost>, surface_id: impl Into<String>) -> Self {
        Self {
            host,
            surface_id: surface_id.into(),
        }
    }

    /// Returns the identifier of the target surface.
    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// Handles one raw text payload.
    ///
    /// Decodes it, logs the value, then replaces the content of the
    /// display surface with the re-encoded value if the surface exists.
    pub fn on_message(&self, raw: &str) -> MessageOutcome {
        let payload = match Payload::decode(raw) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, len = raw.len(), "dropping undecodable message");
                return MessageOutcome::Dropped;
            }
        };

        tracing::info!(kind = ?payload.kind(), data = %payload, "received data");

        match self.render(&payload) {
            Ok(true) => MessageOutcome::Rendered,
            Ok(false) => MessageOutcome::NoSurface,
            Err(e) => {
                tracing::warn!(
                    surface = %self.surface_id,
                    error = %e,
                    "display surface update failed"
                );
                MessageOutcome::RenderFailed
            }
        }
    }

    /// Returns `Ok(false)` when the surface is absent.
    fn render(&self, payload: &Payload) -> Result<bool, RenderError> {
        let attempt = catch_unwind(AssertUnwindSafe(|| -> Result<bool, RenderError> {
            let Some(surface) = self.host.lookup(&self.surface_id)? else {
                return Ok(false);
            };
            surface.replace_content(&payload.render())?;
            Ok(true)
        }));
        attempt.unwrap_or_else(|panic| Err(RenderError::Panicked(panic_message(&*panic))))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
