//! Alphabets that ship with the games.
use game_core::{Alphabet, ContentError, GameConfig, GameKind};

/// Color Sequence buttons, in display order.
pub const COLOR_LABELS: [&str; GameConfig::COLOR_COUNT] = ["red", "blue", "green", "yellow"];

pub fn colors() -> Result<Alphabet, ContentError> {
    Alphabet::new(COLOR_LABELS)
}

/// Digits `0` through `9`.
pub fn digits() -> Result<Alphabet, ContentError> {
    Alphabet::numbered(GameConfig::DIGIT_COUNT as u16)
}

/// Pattern Memory tiles, numbered row by row.
pub fn grid() -> Result<Alphabet, ContentError> {
    Alphabet::numbered(GameConfig::GRID_SIZE as u16)
}

/// Alphabet of a sequence-recall game, `None` for the other engines.
pub fn sequence_alphabet(kind: GameKind) -> Option<Result<Alphabet, ContentError>> {
    match kind {
        GameKind::ColorSequence => Some(colors()),
        GameKind::NumberRecall => Some(digits()),
        GameKind::PatternMemory => Some(grid()),
        GameKind::Matching | GameKind::OddOneOut => None,
    }
}
