//! Content validation errors.
//!
//! Alphabets and question banks are validated once, when they are built, so
//! engines never have to range-check generated content at runtime.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building injected game content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentError {
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet holds {len} symbols, more than the supported {max}")]
    AlphabetTooLarge { len: usize, max: usize },

    #[error("alphabet label '{0}' appears more than once")]
    DuplicateLabel(String),

    #[error("question bank must contain at least one question")]
    EmptyBank,

    #[error("question {question} needs at least two items (got {items})")]
    TooFewItems { question: usize, items: usize },

    #[error("question {question}: odd item '{odd}' is not among its items")]
    OddItemMissing { question: usize, odd: String },

    #[error("question {question}: odd item '{odd}' appears {count} times")]
    OddItemAmbiguous {
        question: usize,
        odd: String,
        count: usize,
    },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyAlphabet => "CONTENT_EMPTY_ALPHABET",
            Self::AlphabetTooLarge { .. } => "CONTENT_ALPHABET_TOO_LARGE",
            Self::DuplicateLabel(_) => "CONTENT_DUPLICATE_LABEL",
            Self::EmptyBank => "CONTENT_EMPTY_BANK",
            Self::TooFewItems { .. } => "CONTENT_TOO_FEW_ITEMS",
            Self::OddItemMissing { .. } => "CONTENT_ODD_ITEM_MISSING",
            Self::OddItemAmbiguous { .. } => "CONTENT_ODD_ITEM_AMBIGUOUS",
        }
    }
}
