// Configuration file loading and creation

use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("action_tennis");
    path.push("config.toml");
    path
}

/// Load configuration from `path` (or the default location).
///
/// A missing file is created with defaults. A file that fails to parse is
/// reported and replaced by defaults; a file that parses but describes an
/// impossible court is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    let config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        parse_config(&contents).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "failed to parse config, using defaults");
            Config::default()
        })
    } else {
        create_default_config(&config_path)?;
        Config::default()
    };

    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("malformed TOML")
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let toml_string =
        toml::to_string_pretty(&Config::default()).context("serializing default config")?;

    let commented_toml = format!(
        "# Action Tennis Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"P\", \"Q\"\n\
         #\n\
         # Physics units are court units per tick (one tick = display.tick_ms)\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "created default config file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        let parsed = parse_config(&toml_string).unwrap();

        assert_eq!(parsed.physics.court_width, config.physics.court_width);
        assert_eq!(parsed.physics.winning_score, config.physics.winning_score);
        assert_eq!(parsed.keybindings.pause, config.keybindings.pause);
        assert_eq!(parsed.display.tick_ms, config.display.tick_ms);
        assert_eq!(parsed.cpu.boost_chance, config.cpu.boost_chance);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [physics]
            winning_score = 5

            [cpu]
            dead_zone = 8.0
        "#;

        let config = parse_config(partial_toml).unwrap();

        assert_eq!(config.physics.winning_score, 5);
        assert_eq!(config.cpu.dead_zone, 8.0);

        assert_eq!(config.physics.paddle_height, 80.0);
        assert_eq!(config.cpu.aim_jitter, 2);
        assert_eq!(config.keybindings.up, "Up");
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = std::env::temp_dir().join(format!("action-tennis-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.physics.court_height, 500.0);
        assert!(path.exists());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Action Tennis Configuration File"));
        assert!(parse_config(&written).is_ok());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_values_are_an_error() {
        let dir = std::env::temp_dir().join(format!("action-tennis-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[physics]\ncourt_width = -1.0\n").unwrap();

        assert!(load_config(Some(&path)).is_err());

        fs::write(&path, "[keybindings]\nstart = \"Launch\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
