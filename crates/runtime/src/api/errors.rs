//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections and worker coordination failures so clients can
//! bubble them up with consistent context.
use game_core::{ErrorSeverity, GameError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine refused the command; its state is unchanged.
    #[error("{message}")]
    Rejected {
        code: &'static str,
        severity: ErrorSeverity,
        message: String,
    },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("session requires a game engine before building")]
    MissingGame,
}

impl RuntimeError {
    pub(crate) fn rejected<E: GameError>(error: &E) -> Self {
        Self::Rejected {
            code: error.error_code(),
            severity: error.severity(),
            message: error.to_string(),
        }
    }

    /// Error code of an engine rejection.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True for rejections that may succeed once the engine moves on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected { severity, .. } if severity.is_recoverable())
    }
}
