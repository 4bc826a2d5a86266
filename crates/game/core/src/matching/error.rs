use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Reasons a reveal was rejected. The board is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchingError {
    #[error("the board is already solved")]
    GameFinished { context: ErrorContext },

    #[error("two cards are still face up")]
    BoardBusy { context: ErrorContext },

    #[error("card {position} is outside the {len}-card board")]
    OutOfBounds {
        position: usize,
        len: usize,
        context: ErrorContext,
    },

    #[error("card {position} is already face up")]
    AlreadyRevealed {
        position: usize,
        context: ErrorContext,
    },

    #[error("card {position} is already matched")]
    AlreadyMatched {
        position: usize,
        context: ErrorContext,
    },
}

impl GameError for MatchingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BoardBusy { .. } | Self::GameFinished { .. } => ErrorSeverity::Recoverable,
            Self::OutOfBounds { .. } | Self::AlreadyRevealed { .. } | Self::AlreadyMatched { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::GameFinished { context }
            | Self::BoardBusy { context }
            | Self::OutOfBounds { context, .. }
            | Self::AlreadyRevealed { context, .. }
            | Self::AlreadyMatched { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameFinished { .. } => "MATCHING_GAME_FINISHED",
            Self::BoardBusy { .. } => "MATCHING_BOARD_BUSY",
            Self::OutOfBounds { .. } => "MATCHING_OUT_OF_BOUNDS",
            Self::AlreadyRevealed { .. } => "MATCHING_ALREADY_REVEALED",
            Self::AlreadyMatched { .. } => "MATCHING_ALREADY_MATCHED",
        }
    }
}
