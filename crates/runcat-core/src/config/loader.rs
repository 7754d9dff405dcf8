use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/runcat/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("runcat"))
}

/// Returns the config file path: `~/.config/runcat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(None)` when the file does not exist, or an error string
/// describing what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Option<Config>, String> {
    let path = config_path().ok_or("could not determine config path")?;
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content)
        .map(Some)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// A missing file silently returns defaults; other errors are reported.
pub fn load() -> Config {
    match try_load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// Parses and validates a config document.
fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{AnimationDriver, Runner, SpeedCurve, Tick};

    #[test]
    fn parse_validates_after_reading() {
        // Arrange
        let toml_str = "[animation]\nmin_scale = 4.0\nmax_scale = 2.0\n";

        // Act
        let config = parse(toml_str).unwrap();

        // Assert
        assert_eq!(config.animation.min_scale, 4.0);
        assert_eq!(config.animation.max_scale, 4.0);
    }

    #[test]
    fn non_finite_animation_values_fall_back_to_defaults() {
        let keys = ["base_interval_ms", "divisor", "min_scale", "max_scale"];
        for key in keys {
            for value in ["nan", "+inf", "-inf"] {
                // Arrange
                let toml_str = format!("[animation]\n{key} = {value}\n");

                // Act
                let config = parse(&toml_str).unwrap();
                let mut driver = AnimationDriver::new(config.runner, config.animation);
                driver.handle(Tick::Sample(Ok(Some(50.0))));

                // Assert
                assert_eq!(config.animation, SpeedCurve::default(), "{key} = {value}");
                assert!(driver.interval() > Duration::ZERO, "{key} = {value}");
            }
        }
    }

    #[test]
    fn parse_reports_syntax_errors() {
        assert!(parse("runner = ").is_err());
    }

    #[test]
    fn empty_document_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config.runner, Runner::Cat);
    }

    #[test]
    fn config_path_lives_in_config_dir() {
        if let (Some(dir), Some(path)) = (config_dir(), config_path()) {
            assert_eq!(path.parent(), Some(dir.as_path()));
            assert!(dir.ends_with(PathBuf::from(".config").join("runcat")));
        }
    }
}
