use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::ai::{Agent, LookAheadAgent, MinimumAgent, RandomAgent, DEFAULT_STEPS};
use crate::error::ConfigError;
use crate::game::{Board, Player};

/// Board dimensions and win condition, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_condition: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 6,
            cols: 7,
            win_condition: 4,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Result<Board, ConfigError> {
        Board::new(self.rows, self.cols, self.win_condition)
    }
}

/// Which agent to field for a seat, in the compact string form used in
/// config files: `"rand"`, `"min"`, `"look"` or `"look<steps>"`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgentSpec {
    Random,
    Minimum,
    LookAhead { steps: usize },
}

impl AgentSpec {
    /// Construct the agent this spec describes, bound to `player`.
    pub fn build(&self, player: Player) -> Result<Box<dyn Agent>, ConfigError> {
        Ok(match self {
            AgentSpec::Random => Box::new(RandomAgent::new(player)),
            AgentSpec::Minimum => Box::new(MinimumAgent::new(player)),
            AgentSpec::LookAhead { steps } => Box::new(LookAheadAgent::new(player, *steps)?),
        })
    }
}

impl FromStr for AgentSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rand" => Ok(AgentSpec::Random),
            "min" => Ok(AgentSpec::Minimum),
            "look" => Ok(AgentSpec::LookAhead {
                steps: DEFAULT_STEPS,
            }),
            other => match other.strip_prefix("look") {
                Some(digits) => {
                    let steps = digits.parse().map_err(|_| {
                        ConfigError::Validation(format!(
                            "invalid look-ahead steps in agent '{other}'"
                        ))
                    })?;
                    Ok(AgentSpec::LookAhead { steps })
                }
                None => Err(ConfigError::Validation(format!("unknown agent '{other}'"))),
            },
        }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentSpec::Random => write!(f, "rand"),
            AgentSpec::Minimum => write!(f, "min"),
            AgentSpec::LookAhead { steps } => write!(f, "look{steps}"),
        }
    }
}

impl TryFrom<String> for AgentSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentSpec> for String {
    fn from(spec: AgentSpec) -> String {
        spec.to_string()
    }
}

/// Agent assignment for the two seats.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub player1: AgentSpec,
    pub player2: AgentSpec,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            player1: AgentSpec::LookAhead {
                steps: DEFAULT_STEPS,
            },
            player2: AgentSpec::Random,
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub players: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: BoardConfig::default(),
            players: PlayerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be > 0".into()));
        }
        if self.board.win_condition == 0 {
            return Err(ConfigError::Validation(
                "board.win_condition must be > 0".into(),
            ));
        }
        if self.board.win_condition > self.board.rows.min(self.board.cols) {
            return Err(ConfigError::Validation(
                "board.win_condition must be <= min(board.rows, board.cols)".into(),
            ));
        }

        for spec in [&self.players.player1, &self.players.player2] {
            if let AgentSpec::LookAhead { steps } = spec {
                if *steps == 0 {
                    return Err(ConfigError::Validation(
                        "player look-ahead steps must be >= 1".into(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
rows = 8
"#;
        let config: GameConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.rows, 8);
        // Other fields should be defaults
        assert_eq!(config.board.cols, 7);
        assert_eq!(
            config.players.player1,
            AgentSpec::LookAhead {
                steps: DEFAULT_STEPS
            }
        );
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_rows() {
        let mut config = GameConfig::default();
        config.board.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_win_condition() {
        let mut config = GameConfig::default();
        config.board.rows = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_look_ahead_steps() {
        let mut config = GameConfig::default();
        config.players.player2 = AgentSpec::LookAhead { steps: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_board_config_builds_board() {
        let config = BoardConfig {
            rows: 5,
            cols: 8,
            win_condition: 3,
        };
        let board = config.build().unwrap();
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 8);
        assert_eq!(board.win_condition(), 3);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = GameConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
rows = 5
cols = 5
win_condition = 3

[players]
player1 = "min"
player2 = "look6"
"#
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.board.rows, 5);
        assert_eq!(config.board.win_condition, 3);
        assert_eq!(config.players.player1, AgentSpec::Minimum);
        assert_eq!(config.players.player2, AgentSpec::LookAhead { steps: 6 });
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
win_condition = 9
"#
        )
        .unwrap();

        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = GameConfig::default_toml();
        let config: GameConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, GameConfig::default());
    }

    // --- Agent spec tests ---

    #[test]
    fn test_agent_spec_parses_strings() {
        assert_eq!(AgentSpec::from_str("rand").unwrap(), AgentSpec::Random);
        assert_eq!(AgentSpec::from_str("min").unwrap(), AgentSpec::Minimum);
        assert_eq!(
            AgentSpec::from_str("look").unwrap(),
            AgentSpec::LookAhead {
                steps: DEFAULT_STEPS
            }
        );
        assert_eq!(
            AgentSpec::from_str("look2").unwrap(),
            AgentSpec::LookAhead { steps: 2 }
        );
    }

    #[test]
    fn test_agent_spec_rejects_unknown_strings() {
        assert!(AgentSpec::from_str("alphabeta").is_err());
        assert!(AgentSpec::from_str("lookdeep").is_err());
        assert!(AgentSpec::from_str("").is_err());
    }

    #[test]
    fn test_agent_spec_displays_strings() {
        assert_eq!(AgentSpec::Random.to_string(), "rand");
        assert_eq!(AgentSpec::Minimum.to_string(), "min");
        assert_eq!(AgentSpec::LookAhead { steps: 6 }.to_string(), "look6");
    }

    #[test]
    fn test_agent_spec_builds_boxed_agents() {
        let board = Board::standard();
        for (spec, name) in [
            (AgentSpec::Random, "Random"),
            (AgentSpec::Minimum, "Minimum"),
            (AgentSpec::LookAhead { steps: 1 }, "LookAhead"),
        ] {
            let mut agent = spec.build(Player::Two).unwrap();
            assert_eq!(agent.name(), name);
            assert_eq!(agent.player(), Player::Two);
            assert!(agent.choose_column(&board) < board.cols());
        }
    }

    #[test]
    fn test_agent_spec_rejects_zero_steps_at_build() {
        let spec = AgentSpec::LookAhead { steps: 0 };
        assert!(spec.build(Player::One).is_err());
    }
}
