//! Contract shared by every mini-game engine.
use core::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::GameError;
use crate::timer::{Deferred, Fired, RoundToken, Schedule};

/// Every game the crate ships.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GameKind {
    ColorSequence,
    NumberRecall,
    PatternMemory,
    Matching,
    OddOneOut,
}

impl GameKind {
    /// RNG stream id, keeps engines that share a session seed independent.
    pub const fn stream(self) -> u32 {
        match self {
            Self::ColorSequence => 1,
            Self::NumberRecall => 2,
            Self::PatternMemory => 3,
            Self::Matching => 4,
            Self::OddOneOut => 5,
        }
    }
}

/// Final numeric result of a session, per engine family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Outcome {
    Recall {
        score: u32,
        /// Highest level reached (1-based).
        level: u32,
        best_streak: u32,
        /// True when the sequence hit its maximum length instead of running out of lives.
        completed: bool,
    },
    Matching {
        moves: u32,
        pairs: u32,
    },
    Classification {
        correct: u32,
        total: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOutcome {
    pub kind: GameKind,
    pub result: Outcome,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            Outcome::Recall {
                score,
                level,
                best_streak,
                completed,
            } => {
                write!(
                    f,
                    "{}: score {score}, level {level}, best streak {best_streak}",
                    self.kind
                )?;
                if completed {
                    write!(f, " (completed)")?;
                }
                Ok(())
            }
            Outcome::Matching { moves, pairs } => {
                write!(f, "{}: {pairs} pairs in {moves} moves", self.kind)
            }
            Outcome::Classification { correct, total } => {
                write!(f, "{}: {correct} out of {total} correct", self.kind)
            }
        }
    }
}

/// A turn-based mini-game driven by discrete inputs and deferred timers.
///
/// Engines are synchronous and never read a clock. Every call that may need a
/// later transition returns a [`Schedule`]; the host waits out the delay and
/// passes the [`Deferred`] back through [`MiniGame::fire`]. Rejected inputs
/// leave the engine untouched.
pub trait MiniGame {
    type Input: Clone + fmt::Debug;
    type Timer: Copy + fmt::Debug + PartialEq;
    type Error: GameError + std::error::Error;

    fn kind(&self) -> GameKind;

    /// Token stamped on the most recently scheduled timer.
    fn round(&self) -> RoundToken;

    /// Leaves the entry (or terminal) state and begins a session.
    fn start(&mut self) -> Result<Schedule<Self::Timer>, Self::Error>;

    fn handle_input(&mut self, input: Self::Input) -> Result<Schedule<Self::Timer>, Self::Error>;

    /// Applies an elapsed timer, or reports it stale.
    fn fire(&mut self, deferred: Deferred<Self::Timer>) -> Fired<Self::Timer>;

    /// Resets every counter and begins a fresh session from any state.
    fn restart(&mut self) -> Schedule<Self::Timer>;

    /// `Some` once the session reached a terminal state.
    fn outcome(&self) -> Option<SessionOutcome>;

    fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}
