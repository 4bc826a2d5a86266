//! High-level session orchestrator.
//!
//! A [`Session`] owns the worker task that hosts one engine, wires up the
//! command and event channels, and exposes a builder-based API.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, SessionGame, SessionHandle};
use crate::events::EventBus;
use crate::workers::SessionWorker;

/// Session configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed RNG seed; a fresh random seed is drawn when unset.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// The configured seed, or a random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Running session of one engine
///
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Session<G: SessionGame> {
    handle: SessionHandle<G>,
    worker_handle: JoinHandle<()>,
}

impl<G: SessionGame> Session<G> {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder<G> {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle<G> {
        self.handle.clone()
    }

    /// Shutdown the session gracefully
    ///
    /// Waits for the worker once every outstanding handle has been dropped;
    /// pending timers are cancelled.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder<G: SessionGame> {
    config: SessionConfig,
    game: Option<G>,
}

impl<G: SessionGame> SessionBuilder<G> {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            game: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the engine to host
    pub fn game(mut self, game: G) -> Self {
        self.game = Some(game);
        self
    }

    /// Spawn the worker. Must be called inside a tokio runtime.
    pub fn build(self) -> Result<Session<G>> {
        let game = self.game.ok_or(RuntimeError::MissingGame)?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = SessionWorker::new(game, command_rx, command_tx.downgrade(), event_bus.clone());
        let worker_handle = tokio::spawn(worker.run());

        Ok(Session {
            handle: SessionHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}
