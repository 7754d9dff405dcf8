mod loader;
pub mod template;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::runner::Runner;
use crate::speed::SpeedCurve;

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for RunCat.
///
/// Loaded from `~/.config/runcat/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Runner shown at launch. Menu changes are not written back.
    pub runner: Runner,
    /// Mapping from CPU usage to frame interval.
    pub animation: SpeedCurve,
    /// Where to look for icon files.
    pub icons: IconConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Icon source settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Directory holding `<runner>_<frame>.ico` files (e.g. `cat_0.ico`).
    /// Frames without a file are drawn procedurally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl IconConfig {
    /// Path of the icon file for one frame, if a directory is configured.
    pub fn frame_path(&self, runner: Runner, frame: usize) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("{}_{frame}.ico", runner.name())))
    }
}

impl Config {
    /// Clamps animation and logging values to safe ranges.
    pub fn validate(&mut self) {
        self.animation.validate();
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert_eq!(config.runner, Runner::Cat);
        assert_eq!(config.animation.base_interval_ms, 200.0);
        assert_eq!(config.icons.directory, None);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "runner = \"parrot\"\n[animation]\nmax_scale = 10.0\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.runner, Runner::Parrot);
        assert_eq!(config.animation.max_scale, 10.0);
        assert_eq!(config.animation.divisor, 5.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_runner_is_rejected() {
        let result: Result<Config, _> = toml::from_str("runner = \"dog\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_clamps_extreme_values() {
        // Arrange
        let mut config = Config {
            animation: SpeedCurve {
                base_interval_ms: -5.0,
                divisor: 1e9,
                ..Default::default()
            },
            ..Default::default()
        };
        config.logging.max_file_mb = 0;

        // Act
        config.validate();

        // Assert
        assert_eq!(config.animation.base_interval_ms, 10.0);
        assert_eq!(config.animation.divisor, 100.0);
        assert_eq!(config.logging.max_file_mb, 1);
    }

    #[test]
    fn frame_path_joins_runner_and_index() {
        // Arrange
        let icons = IconConfig {
            directory: Some(PathBuf::from("icons")),
        };

        // Act
        let path = icons.frame_path(Runner::Parrot, 7);

        // Assert
        assert_eq!(path, Some(PathBuf::from("icons").join("parrot_7.ico")));
        assert_eq!(IconConfig::default().frame_path(Runner::Cat, 0), None);
    }
}
