/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `runcat init` to create a starter config file that users can
/// immediately edit.
pub fn generate_config() -> String {
    r##"# RunCat configuration
# Location: ~/.config/runcat/config.toml

# Runner shown at launch: "cat" or "parrot".
# Switching from the tray menu only lasts until exit.
runner = "cat"

# How CPU usage maps to animation speed. Usage is divided by `divisor`,
# clamped to min_scale..max_scale, and base_interval_ms is divided by
# the result. Defaults give 200 ms per frame when idle, 10 ms at 100%.
[animation]
base_interval_ms = 200.0
divisor = 5.0
min_scale = 1.0
max_scale = 20.0

[icons]
# Directory with <runner>_<frame>.ico files, e.g. cat_0.ico .. cat_4.ico
# and parrot_0.ico .. parrot_9.ico. Missing frames are drawn built-in.
# directory = "C:/Users/me/runcat-icons"

[logging]
# Enable file logging to ~/.config/runcat/logs/runcat.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn config_template_parses_as_valid_config() {
        // Arrange
        let toml_str = generate_config();

        // Act
        let result: Result<Config, _> = toml::from_str(&toml_str);

        // Assert
        assert!(
            result.is_ok(),
            "config template is not valid TOML: {result:?}"
        );
    }

    #[test]
    fn config_template_matches_default_values() {
        // Arrange
        let toml_str = generate_config();

        // Act
        let mut config: Config = toml::from_str(&toml_str).unwrap();
        config.validate();

        // Assert
        let mut defaults = Config::default();
        defaults.validate();
        assert_eq!(config, defaults);
    }
}
