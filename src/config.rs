use std::path::Path;

use tracing::warn;

use crate::ai::{EvalWeights, SearchConfig, MAX_SEARCH_DEPTH};
use crate::error::ConfigError;
use crate::session::SessionConfig;

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub eval: EvalWeights,
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
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
        let depths = [
            ("search.connect_four_depth", self.search.connect_four_depth),
            ("search.tic_tac_toe_depth", self.search.tic_tac_toe_depth),
        ];
        for (name, depth) in depths {
            if depth == 0 || depth > MAX_SEARCH_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in [1, {MAX_SEARCH_DEPTH}]"
                )));
            }
        }
        self.eval.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&EngineConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use crate::players::{Mode, ModeKind};
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
connect_four_depth = 5
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.connect_four_depth, 5);
        // Other fields should be defaults
        assert_eq!(config.search.tic_tac_toe_depth, 9);
        assert!(config.search.pruning);
        assert_eq!(config.eval, EvalWeights::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_session_mode_from_toml() {
        let toml_str = r#"
[session]
mode = "human_vs_ai"
ai_player = "First"
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.mode, ModeKind::HumanVsAi);
        assert_eq!(config.session.mode(), Mode::HumanVsAi(Player::First));
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = EngineConfig::default();
        config.search.connect_four_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = EngineConfig::default();
        config.search.tic_tac_toe_depth = MAX_SEARCH_DEPTH + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_monotone_weights() {
        let mut config = EngineConfig::default();
        config.eval.opponent_open_pair = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = EngineConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
pruning = false

[eval]
center = 5
"#
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert!(!config.search.pruning);
        assert_eq!(config.eval.center, 5);
        // Others are defaults
        assert_eq!(config.search.connect_four_depth, 7);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[search]\nconnect_four_depth = 0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
        std::fs::write(&path, "[search\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = EngineConfig::default_toml();
        let config: EngineConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, EngineConfig::default());
    }
}
