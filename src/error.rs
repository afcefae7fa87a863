//! Listener error types.
//!
//! [`ListenerError`] covers failures that stop a listener from starting.
//! [`RenderError`] and [`DecodeError`] are per-message failures; the
//! message handler logs and swallows them so they never reach the
//! connection loop.

/// Fatal errors raised while configuring or opening a listener.
///
/// # Error Kinds
///
/// | Variant                  | Raised by                         | Recoverable |
/// |--------------------------|-----------------------------------|-------------|
/// | `EnvironmentUnsupported` | `StreamListener::open`            | no          |
/// | `InvalidPageUrl`         | `PageLocation::parse`             | no          |
/// | `Config`                 | `ListenerConfig::from_env`        | no          |
/// | `Join`                   | `StreamListener::close`           | no          |
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The streaming transport cannot be used from this environment.
    #[error("environment unsupported: {0}")]
    EnvironmentUnsupported(String),

    /// The configured page location is not a valid URL.
    #[error("invalid page url: {0}")]
    InvalidPageUrl(#[from] url::ParseError),

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The connection task ended abnormally.
    #[error("connection task failed: {0}")]
    Join(String),
}

impl ListenerError {
    /// Returns a short stable label for this error, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EnvironmentUnsupported(_) => "environment_unsupported",
            Self::InvalidPageUrl(_) => "invalid_page_url",
            Self::Config(_) => "config",
            Self::Join(_) => "join",
        }
    }
}

/// Failure while looking up or writing the display surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The display host failed to resolve a surface.
    #[error("surface lookup failed: {0}")]
    Lookup(String),

    /// Writing the rendered content failed.
    #[error("surface write failed: {0}")]
    Write(#[from] std::io::Error),

    /// The surface exists but can no longer accept content.
    #[error("surface detached: {0}")]
    Detached(String),

    /// The display host or surface panicked.
    #[error("surface panicked: {0}")]
    Panicked(String),
}

/// An inbound payload that is not valid JSON.
#[derive(Debug, thiserror::Error)]
#[error("payload is not valid json: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);
