use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Reasons an odd-one-out input was rejected. The engine is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OddOneOutError {
    #[error("no question is open for an answer ({phase})")]
    NotPresenting {
        phase: &'static str,
        context: ErrorContext,
    },

    #[error("the current question has not been answered yet")]
    NotResolved { context: ErrorContext },

    #[error("item {index} is outside the {len} items of this question")]
    ItemOutOfRange {
        index: usize,
        len: usize,
        context: ErrorContext,
    },

    #[error("'{item}' is not one of the items of this question")]
    UnknownItem { item: String, context: ErrorContext },

    #[error("a quiz is already running ({phase}); restart it instead")]
    SessionActive {
        phase: &'static str,
        context: ErrorContext,
    },
}

impl GameError for OddOneOutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPresenting { .. } | Self::NotResolved { .. } | Self::SessionActive { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::ItemOutOfRange { .. } | Self::UnknownItem { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotPresenting { context, .. }
            | Self::NotResolved { context }
            | Self::ItemOutOfRange { context, .. }
            | Self::UnknownItem { context, .. }
            | Self::SessionActive { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPresenting { .. } => "ODD_ONE_OUT_NOT_PRESENTING",
            Self::NotResolved { .. } => "ODD_ONE_OUT_NOT_RESOLVED",
            Self::ItemOutOfRange { .. } => "ODD_ONE_OUT_ITEM_OUT_OF_RANGE",
            Self::UnknownItem { .. } => "ODD_ONE_OUT_UNKNOWN_ITEM",
            Self::SessionActive { .. } => "ODD_ONE_OUT_SESSION_ACTIVE",
        }
    }
}
