//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! driving the engine or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{MiniGame, SessionOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// An engine that can be moved into a worker task.
pub trait SessionGame: MiniGame<Input: Send, Timer: Send> + Clone + Send + 'static {}

impl<G> SessionGame for G
where
    G: MiniGame + Clone + Send + 'static,
    G::Input: Send,
    G::Timer: Send,
{
}

/// Client-facing handle to interact with a running session
pub struct SessionHandle<G: SessionGame> {
    command_tx: mpsc::Sender<Command<G>>,
    event_bus: EventBus,
}

impl<G: SessionGame> SessionHandle<G> {
    pub(crate) fn new(command_tx: mpsc::Sender<Command<G>>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command<G>,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Leave the entry (or terminal) state and begin a session
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Hand one player input to the engine
    ///
    /// Rejected inputs come back as [`RuntimeError::Rejected`] and leave the
    /// engine unchanged.
    pub async fn input(&self, input: G::Input) -> Result<()> {
        self.request(|reply| Command::Input { input, reply })
            .await?
    }

    /// Reset every counter and begin a fresh session
    ///
    /// Any timer still pending for the previous session is cancelled.
    pub async fn restart(&self) -> Result<()> {
        self.request(|reply| Command::Restart { reply }).await
    }

    /// Query the current engine state (read-only copy)
    pub async fn snapshot(&self) -> Result<G> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Final result, once the session has ended
    pub async fn outcome(&self) -> Result<Option<SessionOutcome>> {
        Ok(self.snapshot().await?.outcome())
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Lifecycle` - Start, restart and the final outcome
    /// - `Topic::Input` - Accepted and rejected inputs
    /// - `Topic::Timer` - Timer scheduling, delivery and stale drops
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut lifecycle = handle.subscribe(Topic::Lifecycle);
    /// while let Ok(event) = lifecycle.recv().await {
    ///     // Handle lifecycle events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

impl<G: SessionGame> Clone for SessionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            event_bus: self.event_bus.clone(),
        }
    }
}
