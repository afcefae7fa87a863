//! # ws-stream-listener
//!
//! Client-side real-time notification receiver. Opens one WebSocket
//! connection to `/ws/` on the page host and mirrors every JSON message it
//! receives into a display surface for diagnostic display.
//!
//! ## Architecture
//!
//! ```text
//! Server (pushes JSON text frames)
//!     │
//!     ├── StreamListener (listener)
//!     │       └── connection task (ws/connection)
//!     │               └── MessageHandler (ws/handler)
//!     │
//!     ├── Payload / Endpoint / ConnectionState (domain/)
//!     │
//!     └── DisplayHost ──► DisplaySurface (display/)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ws_stream_listener::config::ListenerConfig;
//! use ws_stream_listener::display::MemoryPage;
//! use ws_stream_listener::domain::PageLocation;
//! use ws_stream_listener::listener::StreamListener;
//!
//! # async fn run() -> Result<(), ws_stream_listener::error::ListenerError> {
//! let config = ListenerConfig::new(PageLocation::parse("http://127.0.0.1:8000/")?);
//! let page = Arc::new(MemoryPage::new());
//! let surface = page.mount_memory(config.surface_id.clone());
//!
//! let mut listener = StreamListener::open(&config, page)?;
//! listener.closed().await;
//! println!("last render: {}", surface.content());
//! listener.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod listener;
pub mod telemetry;
pub mod ws;
