//! Odd-one-out question bank loader.

use std::path::Path;

use game_core::{Question, QuestionBank};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const BUILTIN: &str = include_str!("../../data/questions.ron");

/// One question as written in a RON bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub items: Vec<String>,
    pub odd: String,
    pub rationale: String,
}

/// Loader for question banks from RON files.
pub struct QuestionBankLoader;

impl QuestionBankLoader {
    /// Load and validate a question bank from a RON file.
    pub fn load(path: &Path) -> LoadResult<QuestionBank> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid question bank {}: {}", path.display(), e))
    }

    /// The five questions that ship with the game.
    pub fn builtin() -> LoadResult<QuestionBank> {
        Self::parse(BUILTIN)
    }

    pub fn parse(content: &str) -> LoadResult<QuestionBank> {
        let specs: Vec<QuestionSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question bank RON: {}", e))?;

        let questions = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Question::new(i + 1, spec.items, &spec.odd, spec.rationale))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuestionBank::new(questions)?)
    }
}
