//! Game configuration loader.
//!
//! Config files only list the tunables a player wants to change. Each
//! section is read into an override struct whose fields are all optional
//! and then applied on top of the matching preset, so a missing key keeps
//! that preset's value rather than another game's. TOML has no null, so
//! `max_length = 0` stands for "no maximum".

use std::path::Path;

use game_core::{Draw, Exposure, GameConfig, MatchingRules, Scoring, SequenceRules};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Partial sequence-recall rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceOverrides {
    pub start_length: Option<usize>,
    /// `0` removes the preset's cap.
    pub max_length: Option<usize>,
    pub lives: Option<u32>,
    pub draw: Option<Draw>,
    pub exposure: Option<Exposure>,
    pub scoring: Option<Scoring>,
    pub success_pause_ms: Option<u64>,
    pub failure_pause_ms: Option<u64>,
}

impl SequenceOverrides {
    pub fn apply(self, rules: &mut SequenceRules) {
        if let Some(start_length) = self.start_length {
            rules.start_length = start_length;
        }
        if let Some(max_length) = self.max_length {
            rules.max_length = (max_length > 0).then_some(max_length);
        }
        if let Some(lives) = self.lives {
            rules.lives = lives;
        }
        if let Some(draw) = self.draw {
            rules.draw = draw;
        }
        if let Some(exposure) = self.exposure {
            rules.exposure = exposure;
        }
        if let Some(scoring) = self.scoring {
            rules.scoring = scoring;
        }
        if let Some(ms) = self.success_pause_ms {
            rules.success_pause_ms = ms;
        }
        if let Some(ms) = self.failure_pause_ms {
            rules.failure_pause_ms = ms;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingOverrides {
    pub hide_delay_ms: Option<u64>,
}

impl MatchingOverrides {
    pub fn apply(self, rules: &mut MatchingRules) {
        if let Some(ms) = self.hide_delay_ms {
            rules.hide_delay_ms = ms;
        }
    }
}

/// Shape of a config TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub color_sequence: SequenceOverrides,
    pub number_recall: SequenceOverrides,
    pub pattern_memory: SequenceOverrides,
    pub matching: MatchingOverrides,
}

impl ConfigFile {
    /// Applies every section over the presets.
    pub fn into_config(self) -> GameConfig {
        let mut config = GameConfig::default();
        self.color_sequence.apply(&mut config.color_sequence);
        self.number_recall.apply(&mut config.number_recall);
        self.pattern_memory.apply(&mut config.pattern_memory);
        self.matching.apply(&mut config.matching);
        config
    }
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file holding any subset of the tunables
    ///
    /// # Returns
    ///
    /// Returns a validated GameConfig.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        let config = file.into_config();
        Self::validate(&config)?;
        Ok(config)
    }

    /// Checks every preset against the alphabet it is played with.
    pub fn validate(config: &GameConfig) -> LoadResult<()> {
        let presets = [
            ("color_sequence", &config.color_sequence, GameConfig::COLOR_COUNT),
            ("number_recall", &config.number_recall, GameConfig::DIGIT_COUNT),
            ("pattern_memory", &config.pattern_memory, GameConfig::GRID_SIZE),
        ];
        for (section, rules, alphabet_len) in presets {
            rules
                .validate(alphabet_len)
                .map_err(|e| anyhow::anyhow!("[{}] {}", section, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_presets() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn shipped_config_matches_presets() {
        let shipped = include_str!("../../data/config.toml");
        assert_eq!(ConfigLoader::parse(shipped).unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_keys_fall_back_to_their_own_preset() {
        let config = ConfigLoader::parse(
            r#"
            [number_recall]
            lives = 2

            [matching]
            hide_delay_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.number_recall.lives, 2);
        assert_eq!(config.number_recall.start_length, 3);
        assert_eq!(
            config.number_recall.scoring,
            Scoring::Flat { points: 10 }
        );
        assert_eq!(config.matching.hide_delay_ms, 1500);
        assert_eq!(config.color_sequence, SequenceRules::color_sequence());
    }

    #[test]
    fn replaces_exposure_as_a_whole() {
        let config = ConfigLoader::parse(
            r#"
            [color_sequence.exposure]
            style = "stepwise"
            lead_in_ms = 0
            lit_ms = 800
            gap_ms = 300
            "#,
        )
        .unwrap();
        assert_eq!(
            config.color_sequence.exposure,
            Exposure::Stepwise {
                lead_in_ms: 0,
                lit_ms: 800,
                gap_ms: 300
            }
        );
    }

    #[test]
    fn rejects_invalid_rules_and_unknown_keys() {
        let err = ConfigLoader::parse("[color_sequence]\nlives = 0\n").unwrap_err();
        assert!(err.to_string().contains("color_sequence"));

        assert!(ConfigLoader::parse("[pattern_memory]\nstart_length = 30\n").is_err());
        assert!(ConfigLoader::parse("[matching]\nflip_ms = 10\n").is_err());
    }

    #[test]
    fn zero_max_length_removes_the_cap() {
        let config = ConfigLoader::parse("[pattern_memory]\nmax_length = 0\n").unwrap();
        assert_eq!(config.pattern_memory.max_length, None);
        assert_eq!(
            config.pattern_memory.length_cap(GameConfig::GRID_SIZE),
            Some(GameConfig::GRID_SIZE)
        );

        let config = ConfigLoader::parse("[color_sequence]\nmax_length = 6\n").unwrap();
        assert_eq!(config.color_sequence.max_length, Some(6));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pattern_memory]\nmax_length = 8").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.pattern_memory.max_length, Some(8));
        assert_eq!(config.pattern_memory.draw, Draw::Distinct);
    }
}
