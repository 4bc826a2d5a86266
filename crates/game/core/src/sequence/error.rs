//! Sequence-recall input errors.

use crate::env::Symbol;
use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Reasons a sequence-recall input was rejected. The engine is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SequenceError {
    #[error("input is disabled while {phase}")]
    NotAwaitingInput {
        phase: &'static str,
        context: ErrorContext,
    },

    #[error("symbol {symbol} is outside the {len}-symbol alphabet")]
    SymbolOutOfRange {
        symbol: Symbol,
        len: usize,
        context: ErrorContext,
    },

    #[error("a session is already running ({phase}); restart it instead")]
    SessionActive {
        phase: &'static str,
        context: ErrorContext,
    },
}

impl GameError for SequenceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAwaitingInput { .. } | Self::SessionActive { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::SymbolOutOfRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotAwaitingInput { context, .. }
            | Self::SymbolOutOfRange { context, .. }
            | Self::SessionActive { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAwaitingInput { .. } => "SEQUENCE_NOT_AWAITING_INPUT",
            Self::SymbolOutOfRange { .. } => "SEQUENCE_SYMBOL_OUT_OF_RANGE",
            Self::SessionActive { .. } => "SEQUENCE_SESSION_ACTIVE",
        }
    }
}
