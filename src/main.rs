//! ws-stream-listener entry point.
//!
//! Connects to the page's event stream and mirrors each message into the
//! display surface until Ctrl-C or until the server ends the stream.

use std::sync::Arc;

use anyhow::Context;

use ws_stream_listener::config::ListenerConfig;
use ws_stream_listener::display::{DisplaySurface, FileSurface, MemoryPage};
use ws_stream_listener::domain::ConnectionState;
use ws_stream_listener::listener::StreamListener;
use ws_stream_listener::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ListenerConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    telemetry::init(config.log_format);
    tracing::info!(page = %config.page, surface = %config.surface_id, "starting ws-stream-listener");

    // Build the display page
    let page = Arc::new(MemoryPage::new());
    if let Some(path) = &config.display_file {
        tracing::info!(path = %path.display(), "mirroring display surface to file");
        let surface: Arc<dyn DisplaySurface> = Arc::new(FileSurface::new(path));
        page.mount(config.surface_id.clone(), surface);
    }

    // Open the stream
    let mut listener = StreamListener::open(&config, page)?;

    tokio::select! {
        state = listener.closed() => {
            tracing::info!(state = %state, "stream ended");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for ctrl-c")?;
            tracing::info!("shutdown requested");
        }
    }

    let state = listener.close().await?;
    let stats = listener.stats();
    tracing::info!(
        frames = stats.frames_received,
        rendered = stats.rendered,
        no_surface = stats.no_surface,
        dropped = stats.dropped,
        render_failures = stats.render_failures,
        ignored = stats.ignored_frames,
        "listener stopped"
    );

    if state == ConnectionState::Errored {
        anyhow::bail!("connection to {} failed", listener.endpoint());
    }
    Ok(())
}
