//! Built-in content and data-file loaders for the brain-training games.
//!
//! This crate houses the shipped alphabets and question bank, and provides
//! loaders for player-supplied content:
//! - Game tunables (TOML, partial files fall back to the presets)
//! - Odd-one-out question banks (RON)
//! - Pair-matching card faces (RON)
//!
//! Everything produced here is immutable and injected into engines at
//! construction.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{COLOR_LABELS, colors, digits, grid, sequence_alphabet};

#[cfg(feature = "loaders")]
pub use loaders::{AlphabetLoader, ConfigLoader, ContentFactory, QuestionBankLoader};
