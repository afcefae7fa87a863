//! Listener configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable       | Default                  |
//! |----------------|--------------------------|
//! | `PAGE_URL`     | `http://127.0.0.1:8000/` |
//! | `SURFACE_ID`   | `testWebSocket`          |
//! | `DISPLAY_FILE` | unset                    |
//! | `LOG_FORMAT`   | `pretty`                 |

use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::PageLocation;
use crate::error::ListenerError;

/// Identifier of the diagnostic display surface.
pub const DEFAULT_SURFACE_ID: &str = "testWebSocket";

/// Page location used when `PAGE_URL` is not set.
pub const DEFAULT_PAGE_URL: &str = "http://127.0.0.1:8000/";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl FromStr for LogFormat {
    type Err = ListenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ListenerError::Config(format!(
                "unknown LOG_FORMAT {other:?}, expected \"pretty\" or \"json\""
            ))),
        }
    }
}

/// Top-level listener configuration.
///
/// Loaded once at startup via [`ListenerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Location of the page the endpoint is derived from.
    pub page: PageLocation,

    /// Identifier the display surface is looked up by on every message.
    pub surface_id: String,

    /// Optional file that backs the display surface in the binary.
    pub display_file: Option<PathBuf>,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl ListenerConfig {
    /// Builds a configuration for `page` with default settings.
    #[must_use]
    pub fn new(page: PageLocation) -> Self {
        Self {
            page,
            surface_id: DEFAULT_SURFACE_ID.to_string(),
            display_file: None,
            log_format: LogFormat::default(),
        }
    }

    /// Overrides the display surface identifier.
    #[must_use]
    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = surface_id.into();
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::InvalidPageUrl`] if `PAGE_URL` cannot be
    /// parsed, or [`ListenerError::Config`] for an empty `SURFACE_ID` or an
    /// unknown `LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ListenerError> {
        dotenvy::dotenv().ok();

        let page_url =
            std::env::var("PAGE_URL").unwrap_or_else(|_| DEFAULT_PAGE_URL.to_string());
        let page = PageLocation::parse(&page_url)?;

        let surface_id =
            std::env::var("SURFACE_ID").unwrap_or_else(|_| DEFAULT_SURFACE_ID.to_string());
        if surface_id.trim().is_empty() {
            return Err(ListenerError::Config("SURFACE_ID must not be empty".to_string()));
        }

        let display_file = std::env::var_os("DISPLAY_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let log_format = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.parse()?,
            Err(_) => LogFormat::default(),
        };

        Ok(Self {
            page,
            surface_id,
            display_file,
            log_format,
        })
    }
}
