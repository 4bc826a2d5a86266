//! Client configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use game_content::ContentFactory;
use game_core::GameKind;
use runtime::SessionConfig;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub game: GameKind,
    pub config_path: Option<PathBuf>,
    pub questions_path: Option<PathBuf>,
    pub cards_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameKind::ColorSequence,
            config_path: None,
            questions_path: None,
            cards_path: None,
            seed: None,
            log_dir: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BRAIN_GAMES_GAME` - Game to play (default: color-sequence)
    /// - `BRAIN_GAMES_CONFIG` - TOML file overriding game tunables
    /// - `BRAIN_GAMES_QUESTIONS` - RON odd-one-out question bank
    /// - `BRAIN_GAMES_CARDS` - RON list of pair-matching card faces
    /// - `BRAIN_GAMES_SEED` - Fixed RNG seed (random when unset)
    /// - `BRAIN_GAMES_LOG_DIR` - Log directory (platform cache dir when unset)
    /// - `BRAIN_GAMES_SESSION_ID` - Log subdirectory name (timestamp when unset)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(game) = read_env::<GameKind>("BRAIN_GAMES_GAME") {
            config.game = game;
        }
        config.config_path = env::var_os("BRAIN_GAMES_CONFIG").map(PathBuf::from);
        config.questions_path = env::var_os("BRAIN_GAMES_QUESTIONS").map(PathBuf::from);
        config.cards_path = env::var_os("BRAIN_GAMES_CARDS").map(PathBuf::from);
        config.seed = read_env::<u64>("BRAIN_GAMES_SEED");
        config.log_dir = env::var_os("BRAIN_GAMES_LOG_DIR").map(PathBuf::from);
        config.session_id = env::var("BRAIN_GAMES_SESSION_ID").ok();

        config
    }

    /// Applies the optional positional game name, e.g. `brain-games matching`.
    pub fn with_args<I>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(name) = args.into_iter().next() {
            self.game = name
                .parse()
                .map_err(|_| anyhow!("Unknown game '{}'. Expected one of: {}", name, game_names()))?;
        }
        Ok(self)
    }

    pub fn content_factory(&self) -> ContentFactory {
        let mut factory = ContentFactory::new();
        if let Some(path) = &self.config_path {
            factory = factory.with_config(path);
        }
        if let Some(path) = &self.questions_path {
            factory = factory.with_questions(path);
        }
        if let Some(path) = &self.cards_path {
            factory = factory.with_cards(path);
        }
        factory
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seed: self.seed,
            ..SessionConfig::default()
        }
    }
}

fn game_names() -> &'static str {
    "color-sequence, number-recall, pattern-memory, matching, odd-one-out"
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_argument_selects_game() {
        let config = ClientConfig::default()
            .with_args(["odd-one-out".to_owned()])
            .unwrap();
        assert_eq!(config.game, GameKind::OddOneOut);

        let config = ClientConfig::default().with_args(Vec::new()).unwrap();
        assert_eq!(config.game, GameKind::ColorSequence);
    }

    #[test]
    fn unknown_game_is_an_error() {
        let err = ClientConfig::default()
            .with_args(["chess".to_owned()])
            .unwrap_err();
        assert!(err.to_string().contains("chess"));
    }

    #[test]
    fn seed_flows_into_session_config() {
        let config = ClientConfig {
            seed: Some(9),
            ..ClientConfig::default()
        };
        assert_eq!(config.session_config().seed, Some(9));
        assert_eq!(config.session_config().resolve_seed(), 9);
    }
}
