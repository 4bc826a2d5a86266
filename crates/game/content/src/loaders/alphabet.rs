//! Alphabet loader.

use std::path::Path;

use game_core::Alphabet;

use crate::loaders::{LoadResult, read_file};

const BUILTIN_CARDS: &str = include_str!("../../data/cards.ron");

/// Loader for alphabets written as a RON list of labels.
pub struct AlphabetLoader;

impl AlphabetLoader {
    pub fn load(path: &Path) -> LoadResult<Alphabet> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid alphabet {}: {}", path.display(), e))
    }

    /// Eight fruit faces for the pair-matching board.
    pub fn builtin_cards() -> LoadResult<Alphabet> {
        Self::parse(BUILTIN_CARDS)
    }

    pub fn parse(content: &str) -> LoadResult<Alphabet> {
        let labels: Vec<String> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse alphabet RON: {}", e))?;
        Ok(Alphabet::new(labels)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_cards_are_eight_fruits() {
        let cards = AlphabetLoader::builtin_cards().unwrap();
        assert_eq!(cards.len(), 8);
        assert_eq!(cards.labels()[0], "🍎");
        assert_eq!(cards.labels()[7], "🥝");
    }

    #[test]
    fn rejects_duplicates_and_empty_lists() {
        assert!(AlphabetLoader::parse(r#"["a", "b", "a"]"#).is_err());
        assert!(AlphabetLoader::parse("[]").is_err());
        assert!(AlphabetLoader::parse("not ron").is_err());
    }
}
