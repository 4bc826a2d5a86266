//! Game configuration constants and tunable parameters.
//!
//! Every duration is stored in milliseconds so configuration files stay flat;
//! engines convert to [`Duration`] at the point they schedule a timer.
use core::time::Duration;

use crate::error::{ErrorSeverity, GameError};
use crate::game::GameKind;

/// How appended sequence elements are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Draw {
    /// Uniform over the whole alphabet; consecutive repeats allowed.
    WithReplacement,
    /// Uniform over the symbols not yet in the sequence.
    Distinct,
}

/// How the sequence is presented during the showing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "style", rename_all = "snake_case"))]
pub enum Exposure {
    /// One element at a time: lit for `lit_ms`, then blank for `gap_ms`.
    Stepwise {
        lead_in_ms: u64,
        lit_ms: u64,
        gap_ms: u64,
    },
    /// Elements light up one by one and stay lit, then all stay for `hold_ms`.
    Cumulative {
        lead_in_ms: u64,
        step_ms: u64,
        hold_ms: u64,
    },
    /// Whole sequence visible with a per-second countdown of
    /// `base_secs + per_level_secs * level`.
    Countdown { base_secs: u32, per_level_secs: u32 },
}

/// Points awarded for a completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Scoring {
    Flat { points: u32 },
    /// `points * level`, using the level of the round just completed.
    PerLevel { points: u32 },
}

impl Scoring {
    pub const fn award(&self, level: u32) -> u32 {
        match *self {
            Self::Flat { points } => points,
            Self::PerLevel { points } => points.saturating_mul(level),
        }
    }
}

/// Rules of one sequence-recall preset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRules {
    pub start_length: usize,
    /// `None` means unbounded for replacement draws and the alphabet size
    /// for distinct draws.
    pub max_length: Option<usize>,
    pub lives: u32,
    pub draw: Draw,
    pub exposure: Exposure,
    pub scoring: Scoring,
    pub success_pause_ms: u64,
    pub failure_pause_ms: u64,
}

impl SequenceRules {
    /// Four colors, grows from one, three lives.
    pub fn color_sequence() -> Self {
        Self {
            start_length: 1,
            max_length: None,
            lives: 3,
            draw: Draw::WithReplacement,
            exposure: Exposure::Stepwise {
                lead_in_ms: 500,
                lit_ms: 600,
                gap_ms: 200,
            },
            scoring: Scoring::Flat { points: 1 },
            success_pause_ms: 1300,
            failure_pause_ms: 1000,
        }
    }

    /// Ten digits shown all at once, starting at three.
    pub fn number_recall() -> Self {
        Self {
            start_length: 3,
            max_length: None,
            lives: 1,
            draw: Draw::WithReplacement,
            exposure: Exposure::Countdown {
                base_secs: 3,
                per_level_secs: 1,
            },
            scoring: Scoring::Flat { points: 10 },
            success_pause_ms: 1300,
            failure_pause_ms: 1000,
        }
    }

    /// Distinct tiles on a 5x5 grid, starting at four, at most twelve.
    pub fn pattern_memory() -> Self {
        Self {
            start_length: 4,
            max_length: Some(12),
            lives: 1,
            draw: Draw::Distinct,
            exposure: Exposure::Cumulative {
                lead_in_ms: 0,
                step_ms: 150,
                hold_ms: 2000,
            },
            scoring: Scoring::PerLevel { points: 10 },
            success_pause_ms: 2000,
            failure_pause_ms: 2000,
        }
    }

    pub fn success_pause(&self) -> Duration {
        Duration::from_millis(self.success_pause_ms)
    }

    pub fn failure_pause(&self) -> Duration {
        Duration::from_millis(self.failure_pause_ms)
    }

    /// Maximum sequence length for an alphabet of `alphabet_len` symbols.
    pub fn length_cap(&self, alphabet_len: usize) -> Option<usize> {
        match self.draw {
            Draw::WithReplacement => self.max_length,
            Draw::Distinct => Some(
                self.max_length
                    .map_or(alphabet_len, |max| max.min(alphabet_len)),
            ),
        }
    }

    /// Checks the rules against the alphabet they will draw from.
    pub fn validate(&self, alphabet_len: usize) -> Result<(), ConfigError> {
        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }
        if self.lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if let Some(max) = self.max_length
            && max < self.start_length
        {
            return Err(ConfigError::MaxBelowStart {
                start: self.start_length,
                max,
            });
        }
        if self.draw == Draw::Distinct && self.start_length > alphabet_len {
            return Err(ConfigError::NotEnoughDistinctSymbols {
                needed: self.start_length,
                available: alphabet_len,
            });
        }
        match self.exposure {
            Exposure::Stepwise { lit_ms: 0, .. } | Exposure::Cumulative { step_ms: 0, .. } => {
                Err(ConfigError::ZeroExposure)
            }
            Exposure::Countdown {
                base_secs: 0,
                per_level_secs: 0,
            } => Err(ConfigError::ZeroExposure),
            _ => Ok(()),
        }
    }
}

impl Default for SequenceRules {
    fn default() -> Self {
        Self::color_sequence()
    }
}

/// Rules of the pair-matching board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchingRules {
    /// How long a mismatched pair stays face up.
    pub hide_delay_ms: u64,
}

impl MatchingRules {
    pub const DEFAULT_HIDE_DELAY_MS: u64 = 1000;

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            hide_delay_ms: Self::DEFAULT_HIDE_DELAY_MS,
        }
    }
}

/// Tunables for every shipped game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub color_sequence: SequenceRules,
    pub number_recall: SequenceRules,
    pub pattern_memory: SequenceRules,
    pub matching: MatchingRules,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const COLOR_COUNT: usize = 4;
    pub const DIGIT_COUNT: usize = 10;
    /// 5x5 pattern grid.
    pub const GRID_SIZE: usize = 25;

    pub fn new() -> Self {
        Self {
            color_sequence: SequenceRules::color_sequence(),
            number_recall: SequenceRules::number_recall(),
            pattern_memory: SequenceRules::pattern_memory(),
            matching: MatchingRules::default(),
        }
    }

    /// Rules of a sequence-recall preset, `None` for the other engines.
    pub fn sequence_rules(&self, kind: GameKind) -> Option<&SequenceRules> {
        match kind {
            GameKind::ColorSequence => Some(&self.color_sequence),
            GameKind::NumberRecall => Some(&self.number_recall),
            GameKind::PatternMemory => Some(&self.pattern_memory),
            GameKind::Matching | GameKind::OddOneOut => None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected sequence or board rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("start length must be at least 1")]
    ZeroStartLength,

    #[error("lives must be at least 1")]
    ZeroLives,

    #[error("max length {max} is below start length {start}")]
    MaxBelowStart { start: usize, max: usize },

    #[error("distinct draws need {needed} symbols but the alphabet has {available}")]
    NotEnoughDistinctSymbols { needed: usize, available: usize },

    #[error("exposure window must be non-zero")]
    ZeroExposure,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroStartLength => "CONFIG_ZERO_START_LENGTH",
            Self::ZeroLives => "CONFIG_ZERO_LIVES",
            Self::MaxBelowStart { .. } => "CONFIG_MAX_BELOW_START",
            Self::NotEnoughDistinctSymbols { .. } => "CONFIG_NOT_ENOUGH_SYMBOLS",
            Self::ZeroExposure => "CONFIG_ZERO_EXPOSURE",
        }
    }
}
