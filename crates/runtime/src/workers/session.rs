//! Session worker that owns the authoritative engine.
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), applies
//! them to the engine, turns requested timers into `tokio` sleeps, and
//! publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use tracing::{debug, info};

use game_core::{Deferred, Fired, GameError, MiniGame, Schedule};

use crate::api::{Result, RuntimeError, SessionGame};
use crate::events::{Event, EventBus, InputEvent, LifecycleEvent, TimerEvent};

/// Commands that can be sent to the session worker
pub enum Command<G: SessionGame> {
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    Input {
        input: G::Input,
        reply: oneshot::Sender<Result<()>>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    /// Query a copy of the engine (read-only).
    Snapshot {
        reply: oneshot::Sender<G>,
    },
    /// A timer elapsed. Sent by the worker's own timer tasks.
    Fire {
        deferred: Deferred<G::Timer>,
    },
}

/// Background task that processes session commands.
///
/// Timer tasks only hold a weak sender, so the worker stops once every
/// [`SessionHandle`](crate::SessionHandle) is dropped.
pub struct SessionWorker<G: SessionGame> {
    game: G,
    command_rx: mpsc::Receiver<Command<G>>,
    timer_tx: mpsc::WeakSender<Command<G>>,
    event_bus: EventBus,
    pending_timer: Option<AbortHandle>,
    reported: bool,
}

impl<G: SessionGame> SessionWorker<G> {
    pub fn new(
        game: G,
        command_rx: mpsc::Receiver<Command<G>>,
        timer_tx: mpsc::WeakSender<Command<G>>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::session",
            kind = %game.kind(),
            "SessionWorker initialized"
        );

        Self {
            game,
            command_rx,
            timer_tx,
            event_bus,
            pending_timer: None,
            reported: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        self.cancel_timer();
        debug!(target: "runtime::session", kind = %self.game.kind(), "SessionWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command<G>) {
        match cmd {
            Command::Start { reply } => {
                let result = self.handle_start();
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Input { input, reply } => {
                let result = self.handle_input(input);
                if reply.send(result).is_err() {
                    debug!("Input reply channel closed (caller dropped)");
                }
            }
            Command::Restart { reply } => {
                self.handle_restart();
                if reply.send(()).is_err() {
                    debug!("Restart reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.game.clone()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Fire { deferred } => self.handle_fire(deferred),
        }
    }

    fn handle_start(&mut self) -> Result<()> {
        let schedule = self
            .game
            .start()
            .map_err(|e| self.reject(&e))?;

        self.reported = false;
        let kind = self.game.kind();
        let round = self.game.round();
        info!(target: "runtime::session", %kind, %round, "session started");
        self.publish(Event::Lifecycle(LifecycleEvent::Started { kind, round }));

        self.schedule(schedule);
        self.report_outcome();
        Ok(())
    }

    fn handle_input(&mut self, input: G::Input) -> Result<()> {
        let summary = format!("{:?}", input);
        let schedule = self
            .game
            .handle_input(input)
            .map_err(|e| self.reject(&e))?;

        let kind = self.game.kind();
        let round = self.game.round();
        debug!(target: "runtime::session", %kind, %round, input = %summary, "input accepted");
        self.publish(Event::Input(InputEvent::Accepted {
            kind,
            round,
            input: summary,
        }));

        self.schedule(schedule);
        self.report_outcome();
        Ok(())
    }

    fn handle_restart(&mut self) {
        self.cancel_timer();
        let schedule = self.game.restart();

        self.reported = false;
        let kind = self.game.kind();
        let round = self.game.round();
        info!(target: "runtime::session", %kind, %round, "session restarted");
        self.publish(Event::Lifecycle(LifecycleEvent::Restarted { kind, round }));

        self.schedule(schedule);
        self.report_outcome();
    }

    fn handle_fire(&mut self, deferred: Deferred<G::Timer>) {
        let round = deferred.token;
        match self.game.fire(deferred) {
            Fired::Stale => {
                debug!(
                    target: "runtime::session",
                    %round,
                    current = %self.game.round(),
                    "Dropping stale timer"
                );
                self.publish(Event::Timer(TimerEvent::Stale { round }));
            }
            Fired::Applied(next) => {
                debug!(target: "runtime::session", %round, timer = ?deferred.timer, "timer fired");
                self.publish(Event::Timer(TimerEvent::Fired { round }));
                self.schedule(next);
                self.report_outcome();
            }
        }
    }

    /// Spawns a sleep for the requested timer, replacing any pending one.
    fn schedule(&mut self, schedule: Schedule<G::Timer>) {
        let Some(deferred) = schedule else {
            return;
        };
        self.cancel_timer();

        let delay_ms = u64::try_from(deferred.delay.as_millis()).unwrap_or(u64::MAX);
        self.publish(Event::Timer(TimerEvent::Scheduled {
            round: deferred.token,
            delay_ms,
        }));

        let timer_tx = self.timer_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(deferred.delay).await;
            if let Some(tx) = timer_tx.upgrade() {
                // Closed only when the worker is shutting down.
                let _ = tx.send(Command::Fire { deferred }).await;
            }
        });
        self.pending_timer = Some(task.abort_handle());
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending_timer.take() {
            timer.abort();
        }
    }

    fn report_outcome(&mut self) {
        if self.reported {
            return;
        }
        if let Some(outcome) = self.game.outcome() {
            self.reported = true;
            info!(target: "runtime::session", %outcome, "session finished");
            self.publish(Event::Lifecycle(LifecycleEvent::Finished { outcome }));
        }
    }

    fn reject<E: GameError>(&self, error: &E) -> RuntimeError {
        let kind = self.game.kind();
        debug!(
            target: "runtime::session",
            %kind,
            code = error.error_code(),
            severity = error.severity().as_str(),
            "input rejected: {}",
            error
        );
        self.publish(Event::Input(InputEvent::Rejected {
            kind,
            code: error.error_code().to_owned(),
            severity: error.severity(),
            message: error.to_string(),
        }));
        RuntimeError::rejected(error)
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }
}
