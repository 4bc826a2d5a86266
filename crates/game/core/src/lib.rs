//! Deterministic brain-training engines shared across hosts.
//!
//! `game-core` holds the rules of every mini-game as synchronous state
//! machines. Engines never read a clock and never touch I/O: the host feeds
//! them inputs and hands back the [`Deferred`] timers they request. All
//! randomness flows through an injected [`RngOracle`], so a fixed seed
//! reproduces a session exactly.
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod matching;
pub mod odd_one_out;
pub mod sequence;
pub mod timer;

pub use config::{ConfigError, Draw, Exposure, GameConfig, MatchingRules, Scoring, SequenceRules};
pub use env::{
    Alphabet, ContentError, Dice, PcgRng, Question, QuestionBank, RngOracle, Symbol, compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use game::{GameKind, MiniGame, Outcome, SessionOutcome};
pub use matching::{BoardPhase, Card, MatchingError, MatchingGame, MatchingInput, MatchingTimer};
pub use odd_one_out::{Feedback, OddOneOutError, OddOneOutGame, OddOneOutInput, QuizPhase};
pub use sequence::{
    Counters, Frame, Phase, SequenceError, SequenceGame, SequenceInput, SequenceTimer,
};
pub use timer::{Deferred, Fired, RoundToken, Schedule};
