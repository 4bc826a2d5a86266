//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Engine-specific errors (e.g., `SequenceError`, `MatchingError`) are defined in their
//! respective modules alongside the engines that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each engine has its own error type with specific variants
//! - **Rich Context**: Errors include the round token and offending index
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No side effects**: A rejected input never changes engine state

use crate::timer::RoundToken;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The input is fine but arrived at the wrong time
///   (during playback, while two cards are unresolved)
/// - **Validation**: Invalid input that should be rejected without retry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later, after the engine has moved on.
    ///
    /// Examples: input while the sequence is showing, board busy
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: symbol outside the alphabet, card index out of bounds
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorContext {
    /// Round token current when the input was rejected.
    pub round: RoundToken,

    /// Position, card or item index the input referred to (if applicable).
    pub index: Option<usize>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(round: RoundToken) -> Self {
        Self {
            round,
            index: None,
        }
    }

    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(RoundToken::INITIAL)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
