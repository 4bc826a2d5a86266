//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into validated game-core values.
//! Built-in content is embedded from `data/` with the same parsers, so the
//! shipped files and player files follow one code path.

pub mod alphabet;
pub mod config;
pub mod factory;
pub mod questions;

pub use alphabet::AlphabetLoader;
pub use config::{ConfigFile, ConfigLoader, MatchingOverrides, SequenceOverrides};
pub use factory::ContentFactory;
pub use questions::{QuestionBankLoader, QuestionSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
