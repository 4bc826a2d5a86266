//! Terminal loops, one per engine family.
//!
//! Every loop follows the same shape: take a snapshot, render it when it
//! changed, then either wait for the next timer or read a line of input.
//! Timer-driven phases are advanced by the session itself; the loop only
//! listens on [`Topic::Timer`] to know when to look again.

pub mod matching;
pub mod odd_one_out;
pub mod sequence;

use anyhow::{Result, bail};
use runtime::{Event, RuntimeError, TimerEvent};
use tokio::sync::broadcast::{self, error::RecvError};

/// A line typed at any prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Restart,
    Answer(&'a str),
}

pub fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "q" | "quit" | "exit" => Command::Quit,
        "r" | "restart" => Command::Restart,
        answer => Command::Answer(answer),
    }
}

/// Blocks until the session applies (or drops) a timer.
pub async fn wait_for_timer(timers: &mut broadcast::Receiver<Event>) -> Result<()> {
    loop {
        match timers.recv().await {
            Ok(Event::Timer(TimerEvent::Fired { .. } | TimerEvent::Stale { .. })) => return Ok(()),
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Timer subscriber lagged by {} events", skipped);
                return Ok(());
            }
            Err(RecvError::Closed) => bail!("session closed while waiting for a timer"),
        }
    }
}

/// Shows an engine rejection to the player, propagates anything else.
pub fn explain(result: runtime::Result<()>) -> Result<Option<String>> {
    match result {
        Ok(()) => Ok(None),
        Err(RuntimeError::Rejected { message, code, .. }) => {
            tracing::debug!("Input rejected: {}", code);
            Ok(Some(message))
        }
        Err(other) => Err(other.into()),
    }
}
