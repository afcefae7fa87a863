//! WebSocket connection task.
//!
//! Owns the client socket for one listener: performs the handshake, then
//! feeds every text frame to the [`MessageHandler`] in arrival order until
//! the stream ends or the owner asks it to stop.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, watch};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::handler::MessageHandler;
use crate::domain::{ConnectionState, Endpoint, ListenerStats};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Everything the connection task needs, moved in at spawn time.
#[derive(Debug)]
pub struct ConnectionContext {
    /// Endpoint to connect to.
    pub endpoint: Endpoint,
    /// The single inbound-message handler.
    pub handler: MessageHandler,
    /// Publishes lifecycle transitions.
    pub state: watch::Sender<ConnectionState>,
    /// Shared diagnostic counters.
    pub stats: Arc<ListenerStats>,
    /// Fires (or is dropped) when the owner wants the connection closed.
    pub shutdown: oneshot::Receiver<()>,
}

/// Runs one connection to completion. Never reconnects.
pub async fn run_connection(ctx: ConnectionContext) {
    let ConnectionContext {
        endpoint,
        handler,
        state,
        stats,
        mut shutdown,
    } = ctx;

    let ws = tokio::select! {
        biased;
        _ = &mut shutdown => {
            tracing::debug!(url = %endpoint, "closed before handshake completed");
            state.send_replace(ConnectionState::Closed);
            return;
        }
        result = tokio_tungstenite::connect_async(endpoint.as_url().as_str()) => match result {
            Ok((ws, response)) => {
                tracing::debug!(status = %response.status(), "handshake complete");
                ws
            }
            Err(e) => {
                tracing::error!(url = %endpoint, error = %e, "websocket connection failed");
                state.send_replace(ConnectionState::Errored);
                return;
            }
        },
    };

    state.send_replace(ConnectionState::Open);
    tracing::info!(url = %endpoint, "websocket open");

    let final_state = read_loop(ws, &handler, &stats, &mut shutdown).await;

    state.send_replace(final_state);
    tracing::info!(url = %endpoint, state = %final_state, "websocket connection ended");
}

/// Reads frames until the stream ends. Returns the terminal state.
async fn read_loop(
    mut ws: WsStream,
    handler: &MessageHandler,
    stats: &ListenerStats,
    shutdown: &mut oneshot::Receiver<()>,
) -> ConnectionState {
    loop {
        tokio::select! {
            biased;
            _ = &mut *shutdown => {
                if let Err(e) = ws.close(None).await {
                    tracing::debug!(error = %e, "close handshake failed");
                }
                return ConnectionState::Closed;
            }
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let outcome = handler.on_message(text.as_str());
                        stats.record(outcome);
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!(len = data.len(), "ignoring binary frame");
                        stats.record_ignored();
                    }
                    Some(Ok(Message::Close(frame))) => {
                        // Keep polling so the close reply gets flushed.
                        tracing::debug!(?frame, "server initiated close");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
                        return ConnectionState::Closed;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "websocket stream error");
                        return ConnectionState::Errored;
                    }
                }
            }
        }
    }
}
