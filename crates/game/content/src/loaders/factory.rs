//! Content factory that resolves every piece of content a session needs.

use std::path::{Path, PathBuf};

use game_core::{Alphabet, GameConfig, GameKind, QuestionBank};

use crate::catalog;
use crate::loaders::{AlphabetLoader, ConfigLoader, LoadResult, QuestionBankLoader};

/// Content sources for a session.
///
/// Every source defaults to the built-in content; a configured path replaces
/// it with a player file.
#[derive(Debug, Clone, Default)]
pub struct ContentFactory {
    config_path: Option<PathBuf>,
    questions_path: Option<PathBuf>,
    cards_path: Option<PathBuf>,
}

impl ContentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_questions(mut self, path: impl Into<PathBuf>) -> Self {
        self.questions_path = Some(path.into());
        self
    }

    pub fn with_cards(mut self, path: impl Into<PathBuf>) -> Self {
        self.cards_path = Some(path.into());
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Game tunables from the config file, or the presets.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn load_questions(&self) -> LoadResult<QuestionBank> {
        match &self.questions_path {
            Some(path) => QuestionBankLoader::load(path),
            None => QuestionBankLoader::builtin(),
        }
    }

    pub fn load_cards(&self) -> LoadResult<Alphabet> {
        match &self.cards_path {
            Some(path) => AlphabetLoader::load(path),
            None => AlphabetLoader::builtin_cards(),
        }
    }

    /// Alphabet an engine of `kind` draws from, `None` for odd-one-out.
    pub fn load_alphabet(&self, kind: GameKind) -> LoadResult<Option<Alphabet>> {
        if kind == GameKind::Matching {
            return self.load_cards().map(Some);
        }
        Ok(catalog::sequence_alphabet(kind).transpose()?)
    }
}
