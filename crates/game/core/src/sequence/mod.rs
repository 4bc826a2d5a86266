//! Sequence-recall engine (Color Sequence, Number Recall, Pattern Memory).
//!
//! The engine shows a sequence, then checks the player's reproduction one
//! symbol at a time. A completed round appends exactly one symbol to the
//! existing sequence; a failed round with lives left replays the same
//! sequence unchanged.
//!
//! ```text
//! Idle ─start─► Showing ─timers─► AwaitingInput ─┬─ full match ─► Success ─► Showing (n + 1)
//!                                                └─ mismatch ───► Failure ─► Showing (same)
//!                                                                        └─► GameOver (no lives)
//! ```
mod error;

pub use error::SequenceError;

use core::time::Duration;

use crate::config::{ConfigError, Draw, Exposure, SequenceRules};
use crate::env::{Alphabet, Dice, PcgRng, RngOracle, Symbol};
use crate::error::ErrorContext;
use crate::game::{GameKind, MiniGame, Outcome, SessionOutcome};
use crate::timer::{Deferred, Fired, RoundToken, Schedule, Timeline};

const SECOND: Duration = Duration::from_secs(1);

/// Player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceInput {
    /// One symbol (click or keystroke), checked immediately.
    Press(Symbol),
    /// A whole answer at once. Shorter or longer answers fail.
    Submit(Vec<Symbol>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceTimer {
    /// Advance the showing animation by one frame.
    Exposure,
    /// Success pause is over; show the grown sequence.
    NextRound,
    /// Failure pause is over; show the same sequence again.
    Replay,
}

/// What the showing phase currently displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frame {
    /// Blank pause before the first element.
    LeadIn,
    /// Only element `i` is visible.
    Lit(usize),
    /// Blank gap after element `i`.
    Gap(usize),
    /// Elements `0..=i` are visible.
    Building(usize),
    /// All elements visible, waiting for the hold to end.
    Holding,
    /// All elements visible with this many seconds left.
    Countdown(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Showing(Frame),
    AwaitingInput,
    Success,
    Failure,
    GameOver,
    /// The sequence reached its maximum length and the last round succeeded.
    Completed,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Showing(_) => "showing",
            Self::AwaitingInput => "awaiting input",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::GameOver => "game over",
            Self::Completed => "completed",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Completed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub lives: u32,
    pub streak: u32,
    /// Survives restarts of the same engine.
    pub best_streak: u32,
    pub score: u32,
    /// 1-based level of the round in play.
    pub level: u32,
}

impl Counters {
    fn fresh(lives: u32, best_streak: u32) -> Self {
        Self {
            lives,
            streak: 0,
            best_streak,
            score: 0,
            level: 1,
        }
    }
}

/// Sequence-recall state machine.
#[derive(Clone, Debug)]
pub struct SequenceGame<R = PcgRng> {
    kind: GameKind,
    rules: SequenceRules,
    alphabet: Alphabet,
    dice: Dice<R>,
    phase: Phase,
    sequence: Vec<Symbol>,
    response: Vec<Symbol>,
    /// Sequence the session was lost on, kept for display after game over.
    missed: Vec<Symbol>,
    last_miss: Option<usize>,
    counters: Counters,
    timeline: Timeline,
}

impl SequenceGame<PcgRng> {
    /// Builds an engine on the default PCG oracle.
    pub fn with_seed(
        kind: GameKind,
        rules: SequenceRules,
        alphabet: Alphabet,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(kind, rules, alphabet, Dice::pcg(seed, kind.stream()))
    }
}

impl<R: RngOracle> SequenceGame<R> {
    pub fn new(
        kind: GameKind,
        rules: SequenceRules,
        alphabet: Alphabet,
        dice: Dice<R>,
    ) -> Result<Self, ConfigError> {
        rules.validate(alphabet.len())?;
        let counters = Counters::fresh(rules.lives, 0);
        Ok(Self {
            kind,
            rules,
            alphabet,
            dice,
            phase: Phase::Idle,
            sequence: Vec::new(),
            response: Vec::new(),
            missed: Vec::new(),
            last_miss: None,
            counters,
            timeline: Timeline::default(),
        })
    }

    // ===== accessors =====

    pub fn rules(&self) -> &SequenceRules {
        &self.rules
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    pub fn response(&self) -> &[Symbol] {
        &self.response
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Index of the most recent mismatch, cleared by the next success.
    pub fn last_miss(&self) -> Option<usize> {
        self.last_miss
    }

    /// The sequence the session ended on, after game over.
    pub fn missed_sequence(&self) -> &[Symbol] {
        &self.missed
    }

    /// Elements visible in the current frame.
    pub fn visible(&self) -> &[Symbol] {
        match self.phase {
            Phase::Showing(Frame::Lit(i)) => &self.sequence[i..=i],
            Phase::Showing(Frame::Building(i)) => &self.sequence[..=i],
            Phase::Showing(Frame::Holding | Frame::Countdown(_)) => &self.sequence,
            _ => &[],
        }
    }

    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            Phase::Showing(Frame::Countdown(secs)) => Some(secs),
            _ => None,
        }
    }

    // ===== input =====

    /// Checks one symbol against the sequence at the next response index.
    pub fn press(&mut self, symbol: Symbol) -> Result<Schedule<SequenceTimer>, SequenceError> {
        self.ensure_awaiting()?;
        self.ensure_symbol(symbol, self.response.len())?;

        let index = self.response.len();
        self.response.push(symbol);

        if self.sequence[index] != symbol {
            return Ok(self.fail(index));
        }
        if self.response.len() == self.sequence.len() {
            return Ok(self.succeed());
        }
        Ok(None)
    }

    /// Checks a complete answer. The first wrong, missing or surplus symbol fails it.
    pub fn submit(&mut self, symbols: &[Symbol]) -> Result<Schedule<SequenceTimer>, SequenceError> {
        self.ensure_awaiting()?;
        let start = self.response.len();
        let expected = &self.sequence[start..];
        let mismatch = symbols
            .iter()
            .zip(expected)
            .position(|(given, wanted)| given != wanted)
            .or_else(|| {
                (symbols.len() != expected.len()).then(|| symbols.len().min(expected.len()))
            });

        // Symbols past the first mismatch are never compared.
        let checked = mismatch.map_or(symbols.len(), |offset| (offset + 1).min(symbols.len()));
        for (offset, symbol) in symbols[..checked].iter().enumerate() {
            self.ensure_symbol(*symbol, start + offset)?;
        }

        match mismatch {
            None => {
                self.response.extend_from_slice(symbols);
                Ok(self.succeed())
            }
            Some(offset) => {
                let recorded = (offset + 1).min(expected.len());
                self.response
                    .extend(symbols.iter().take(recorded).copied());
                Ok(self.fail(start + offset))
            }
        }
    }

    fn ensure_awaiting(&self) -> Result<(), SequenceError> {
        if self.phase == Phase::AwaitingInput {
            return Ok(());
        }
        Err(SequenceError::NotAwaitingInput {
            phase: self.phase.as_str(),
            context: self.context(),
        })
    }

    fn ensure_symbol(&self, symbol: Symbol, index: usize) -> Result<(), SequenceError> {
        if self.alphabet.contains(symbol) {
            return Ok(());
        }
        Err(SequenceError::SymbolOutOfRange {
            symbol,
            len: self.alphabet.len(),
            context: self.context().with_index(index),
        })
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.timeline.token())
    }

    // ===== transitions =====

    fn begin_session(&mut self) -> Schedule<SequenceTimer> {
        self.counters = Counters::fresh(self.rules.lives, self.counters.best_streak);
        self.last_miss = None;
        self.missed.clear();
        self.sequence.clear();
        for _ in 0..self.rules.start_length {
            let symbol = self.draw();
            self.sequence.push(symbol);
        }
        self.begin_showing()
    }

    fn draw(&mut self) -> Symbol {
        let bound = self.alphabet.len() as u32;
        match self.rules.draw {
            Draw::WithReplacement => Symbol(self.dice.below(bound) as u16),
            // Terminates: the length cap keeps the sequence shorter than the alphabet.
            Draw::Distinct => loop {
                let symbol = Symbol(self.dice.below(bound) as u16);
                if !self.sequence.contains(&symbol) {
                    break symbol;
                }
            },
        }
    }

    fn begin_showing(&mut self) -> Schedule<SequenceTimer> {
        self.response.clear();
        match self.rules.exposure {
            Exposure::Stepwise { lead_in_ms, .. } | Exposure::Cumulative { lead_in_ms, .. }
                if lead_in_ms > 0 =>
            {
                self.show(Frame::LeadIn, Duration::from_millis(lead_in_ms))
            }
            _ => self.first_frame(),
        }
    }

    fn first_frame(&mut self) -> Schedule<SequenceTimer> {
        match self.rules.exposure {
            Exposure::Stepwise { lit_ms, .. } => {
                self.show(Frame::Lit(0), Duration::from_millis(lit_ms))
            }
            Exposure::Cumulative { step_ms, .. } => {
                self.show(Frame::Building(0), Duration::from_millis(step_ms))
            }
            Exposure::Countdown {
                base_secs,
                per_level_secs,
            } => {
                let secs = base_secs.saturating_add(per_level_secs.saturating_mul(self.counters.level));
                self.show(Frame::Countdown(secs.max(1)), SECOND)
            }
        }
    }

    fn advance(&mut self, frame: Frame) -> Schedule<SequenceTimer> {
        let last = self.sequence.len() - 1;
        match (frame, self.rules.exposure) {
            (Frame::LeadIn, _) => self.first_frame(),
            (Frame::Lit(i), Exposure::Stepwise { gap_ms, .. }) if gap_ms > 0 => {
                self.show(Frame::Gap(i), Duration::from_millis(gap_ms))
            }
            (Frame::Lit(i) | Frame::Gap(i), Exposure::Stepwise { lit_ms, .. }) if i < last => {
                self.show(Frame::Lit(i + 1), Duration::from_millis(lit_ms))
            }
            (Frame::Building(i), Exposure::Cumulative { step_ms, .. }) if i < last => {
                self.show(Frame::Building(i + 1), Duration::from_millis(step_ms))
            }
            (Frame::Building(_), Exposure::Cumulative { hold_ms, .. }) if hold_ms > 0 => {
                self.show(Frame::Holding, Duration::from_millis(hold_ms))
            }
            (Frame::Countdown(secs), _) if secs > 1 => self.show(Frame::Countdown(secs - 1), SECOND),
            _ => self.await_input(),
        }
    }

    fn show(&mut self, frame: Frame, delay: Duration) -> Schedule<SequenceTimer> {
        self.phase = Phase::Showing(frame);
        self.timeline.schedule(delay, SequenceTimer::Exposure)
    }

    fn await_input(&mut self) -> Schedule<SequenceTimer> {
        self.phase = Phase::AwaitingInput;
        self.timeline.invalidate();
        None
    }

    fn succeed(&mut self) -> Schedule<SequenceTimer> {
        let counters = &mut self.counters;
        counters.streak += 1;
        counters.best_streak = counters.best_streak.max(counters.streak);
        counters.score = counters
            .score
            .saturating_add(self.rules.scoring.award(counters.level));
        self.last_miss = None;

        let at_cap = self
            .rules
            .length_cap(self.alphabet.len())
            .is_some_and(|cap| self.sequence.len() >= cap);
        if at_cap {
            self.phase = Phase::Completed;
            self.timeline.invalidate();
            return None;
        }

        self.counters.level += 1;
        let next = self.draw();
        self.sequence.push(next);
        self.phase = Phase::Success;
        self.timeline
            .schedule(self.rules.success_pause(), SequenceTimer::NextRound)
    }

    fn fail(&mut self, index: usize) -> Schedule<SequenceTimer> {
        self.last_miss = Some(index);
        self.counters.lives = self.counters.lives.saturating_sub(1);
        self.counters.streak = 0;

        if self.counters.lives == 0 {
            self.phase = Phase::GameOver;
            self.missed = std::mem::take(&mut self.sequence);
            self.response.clear();
            self.timeline.invalidate();
            return None;
        }

        self.phase = Phase::Failure;
        self.timeline
            .schedule(self.rules.failure_pause(), SequenceTimer::Replay)
    }
}

impl<R: RngOracle> MiniGame for SequenceGame<R> {
    type Input = SequenceInput;
    type Timer = SequenceTimer;
    type Error = SequenceError;

    fn kind(&self) -> GameKind {
        self.kind
    }

    fn round(&self) -> RoundToken {
        self.timeline.token()
    }

    fn start(&mut self) -> Result<Schedule<SequenceTimer>, SequenceError> {
        if matches!(self.phase, Phase::Idle) || self.phase.is_terminal() {
            return Ok(self.begin_session());
        }
        Err(SequenceError::SessionActive {
            phase: self.phase.as_str(),
            context: self.context(),
        })
    }

    fn handle_input(
        &mut self,
        input: SequenceInput,
    ) -> Result<Schedule<SequenceTimer>, SequenceError> {
        match input {
            SequenceInput::Press(symbol) => self.press(symbol),
            SequenceInput::Submit(symbols) => self.submit(&symbols),
        }
    }

    fn fire(&mut self, deferred: Deferred<SequenceTimer>) -> Fired<SequenceTimer> {
        if !self.timeline.is_live(&deferred) {
            return Fired::Stale;
        }
        let next = match (deferred.timer, self.phase) {
            (SequenceTimer::Exposure, Phase::Showing(frame)) => self.advance(frame),
            (SequenceTimer::NextRound, Phase::Success) | (SequenceTimer::Replay, Phase::Failure) => {
                self.begin_showing()
            }
            _ => return Fired::Stale,
        };
        Fired::Applied(next)
    }

    fn restart(&mut self) -> Schedule<SequenceTimer> {
        self.begin_session()
    }

    fn outcome(&self) -> Option<SessionOutcome> {
        if !self.phase.is_terminal() {
            return None;
        }
        Some(SessionOutcome {
            kind: self.kind,
            result: Outcome::Recall {
                score: self.counters.score,
                level: self.counters.level,
                best_streak: self.counters.best_streak,
                completed: self.phase == Phase::Completed,
            },
        })
    }
}
