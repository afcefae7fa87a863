//! The stream listener: owner of one connection and its handler.
//!
//! [`StreamListener::open`] resolves the endpoint, builds the message
//! handler and spawns the connection task with the handler already moved
//! in, so no frame can arrive before a handler exists. The connection is
//! closed only through [`StreamListener::close`] or by dropping the
//! listener.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::ListenerConfig;
use crate::display::DisplayHost;
use crate::domain::{ConnectionState, Endpoint, ListenerStats, StatsSnapshot};
use crate::error::ListenerError;
use crate::ws::MessageHandler;
use crate::ws::connection::{ConnectionContext, run_connection};

/// A live listener activation.
#[derive(Debug)]
pub struct StreamListener {
    endpoint: Endpoint,
    state_rx: watch::Receiver<ConnectionState>,
    stats: Arc<ListenerStats>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StreamListener {
    /// Opens the connection for `config.page` and starts delivering
    /// messages to the surface `config.surface_id` of `host`.
    ///
    /// Returns as soon as the connection task is spawned; the handshake
    /// outcome is observable through [`StreamListener::state`].
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::EnvironmentUnsupported`] if no Tokio runtime
    /// is running or the page has no usable streaming transport.
    pub fn open(
        config: &ListenerConfig,
        host: Arc<dyn DisplayHost>,
    ) -> Result<Self, ListenerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            ListenerError::EnvironmentUnsupported(format!("no async runtime: {e}"))
        })?;
        let endpoint = Endpoint::for_page(&config.page)?;
        tracing::info!(url = %endpoint, "socket path");

        let handler = MessageHandler::new(host, config.surface_id.clone());
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let stats = Arc::new(ListenerStats::new());

        let task = runtime.spawn(run_connection(ConnectionContext {
            endpoint: endpoint.clone(),
            handler,
            state: state_tx,
            stats: Arc::clone(&stats),
            shutdown: shutdown_rx,
        }));

        Ok(Self {
            endpoint,
            state_rx,
            stats,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Returns the resolved endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the current transport state.
    ///
    /// A connection task that exited without publishing a terminal state
    /// is reported as `Errored`.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        let current = *self.state_rx.borrow();
        if !current.is_terminal() && self.state_rx.has_changed().is_err() {
            return ConnectionState::Errored;
        }
        current
    }

    /// Waits until the state satisfies `pred`, or the connection task has
    /// exited. Returns the state observed last, or `Errored` if the task
    /// exited while the state was still `Connecting` or `Open`.
    pub async fn wait_for_state<F>(&self, mut pred: F) -> ConnectionState
    where
        F: FnMut(ConnectionState) -> bool,
    {
        let mut rx = self.state_rx.clone();
        let observed = rx.wait_for(|s| pred(*s)).await.map(|s| *s);
        match observed {
            Ok(state) => state,
            Err(_) => {
                let last = *rx.borrow();
                if last.is_terminal() {
                    last
                } else {
                    tracing::warn!(state = %last, "connection task exited without a terminal state");
                    ConnectionState::Errored
                }
            }
        }
    }

    /// Waits for the handshake to finish. Returns `Open` on success or the
    /// terminal state it failed into.
    pub async fn wait_until_open(&self) -> ConnectionState {
        self.wait_for_state(|s| s != ConnectionState::Connecting).await
    }

    /// Waits until the connection has ended on its own.
    pub async fn closed(&self) -> ConnectionState {
        self.wait_for_state(ConnectionState::is_terminal).await
    }

    /// Returns a snapshot of the diagnostic counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Closes the connection and waits for the connection task to exit.
    ///
    /// Calling `close` again after it returned is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Join`] if the connection task panicked or
    /// was cancelled.
    pub async fn close(&mut self) -> Result<ConnectionState, ListenerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // The task may already have exited; that is fine.
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.map_err(|e| ListenerError::Join(e.to_string()))?;
        }
        let state = self.state();
        tracing::debug!(url = %self.endpoint, state = %state, "listener closed");
        Ok(state)
    }
}
