//! Event types for different topics.

use game_core::{ErrorSeverity, GameKind, RoundToken, SessionOutcome};
use serde::{Deserialize, Serialize};

/// Session lifecycle (start, restart, end)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Started { kind: GameKind, round: RoundToken },
    Restarted { kind: GameKind, round: RoundToken },
    /// Published once, the moment the engine reaches a terminal state.
    Finished { outcome: SessionOutcome },
}

/// Player inputs and how the engine answered them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Accepted {
        kind: GameKind,
        round: RoundToken,
        input: String,
    },
    /// Engine state is unchanged.
    Rejected {
        kind: GameKind,
        code: String,
        severity: ErrorSeverity,
        message: String,
    },
}

/// Deferred transitions requested by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    Scheduled { round: RoundToken, delay_ms: u64 },
    Fired { round: RoundToken },
    /// Delivered after its timeline was abandoned; nothing changed.
    Stale { round: RoundToken },
}
