use nrow_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use nrow_engine::{MIN_DIMENSION, Mark, SearchSettings};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "nrow_config.yaml";
pub const MAX_DIMENSION: usize = 26;

pub fn get_config_manager(file_path: &str) -> ConfigManager<FileContentConfigProvider, MatchConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Random,
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub mark: Mark,
    pub kind: PlayerKind,
    /// Plies searched below each candidate move. Only used by `Search`.
    #[serde(default)]
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub dimension: usize,
    pub run_length: usize,
    pub starting_mark: Mark,
    pub players: Vec<PlayerConfig>,
    pub search: SearchSettings,
    pub seed: Option<u64>,
    pub move_delay_ms: u64,
}

impl Validate for MatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dimension < MIN_DIMENSION || self.dimension > MAX_DIMENSION {
            return Err(format!(
                "dimension must be between {} and {}",
                MIN_DIMENSION, MAX_DIMENSION
            ));
        }
        if self.run_length < MIN_DIMENSION || self.run_length > self.dimension {
            return Err(format!(
                "run_length must be between {} and the dimension ({})",
                MIN_DIMENSION, self.dimension
            ));
        }
        if self.starting_mark.is_empty() {
            return Err("starting_mark must be X or O".to_string());
        }
        if self.players.len() != 2 {
            return Err("exactly two players must be configured".to_string());
        }
        for player in &self.players {
            player.validate()?;
        }
        if self.players[0].mark == self.players[1].mark {
            return Err("players must use different marks".to_string());
        }
        Ok(())
    }
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mark.is_empty() {
            return Err("player mark must be X or O".to_string());
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            dimension: 3,
            run_length: 3,
            starting_mark: Mark::X,
            players: vec![
                PlayerConfig {
                    mark: Mark::X,
                    kind: PlayerKind::Human,
                    depth: 0,
                },
                PlayerConfig {
                    mark: Mark::O,
                    kind: PlayerKind::Search,
                    depth: 6,
                },
            ],
            search: SearchSettings::default(),
            seed: None,
            move_delay_ms: 0,
        }
    }
}
