use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSize;

const APP_DIR_NAME: &str = "toroid-snake";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "toroid-snake.log";

/// Default field width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default field height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: u64 = 20;

/// Fixed interval between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND);

/// Terminal columns used to draw one cell, so cells look roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Startup configuration. Only the grid dimensions are recognized.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Reads configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Read(e)),
        };

        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces dimensions given on the command line.
    #[must_use]
    pub fn with_overrides(self, grid_width: Option<u16>, grid_height: Option<u16>) -> Self {
        Self {
            grid_width: grid_width.unwrap_or(self.grid_width),
            grid_height: grid_height.unwrap_or(self.grid_height),
        }
    }

    /// Checks that the food can always be placed next to a fresh snake.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 || self.bounds().total_cells() < 2 {
            return Err(ConfigError::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn bounds(self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }
}

/// Returns the platform-correct configuration file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|p| p.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoPath)
}

/// Returns the platform-correct log file path, falling back to the working
/// directory.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[source] io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] serde_json::Error),
    #[error("grid of {width}×{height} cells is too small to play on")]
    InvalidDimensions { width: u16, height: u16 },
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{ConfigError, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GameConfig, TICK_INTERVAL};
    use crate::grid::GridSize;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let config = GameConfig::load(&dir.path().join("config.json")).expect("load should succeed");

        assert_eq!(config, GameConfig::default());
        assert_eq!(
            config.bounds(),
            GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            }
        );
    }

    #[test]
    fn file_values_are_used() {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"grid_width": 40, "grid_height": 30}"#).expect("write should succeed");

        let config = GameConfig::load(&path).expect("load should succeed");

        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
    }

    #[test]
    fn partial_file_keeps_other_default() {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"grid_height": 10}"#).expect("write should succeed");

        let config = GameConfig::load(&path).expect("load should succeed");

        assert_eq!(config.grid_width, DEFAULT_GRID_WIDTH);
        assert_eq!(config.grid_height, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"grid_width": 40, "speed": 3}"#).expect("write should succeed");

        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn malformed_file_returns_error() {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("config.json");
        fs::write(&path, "not-json").expect("write should succeed");

        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        let zero = GameConfig {
            grid_width: 0,
            grid_height: 10,
        };
        let single = GameConfig {
            grid_width: 1,
            grid_height: 1,
        };
        let strip = GameConfig {
            grid_width: 2,
            grid_height: 1,
        };

        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(single.validate().is_err());
        assert!(strip.validate().is_ok());
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let config = GameConfig::default().with_overrides(Some(12), None);

        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
    }

    #[test]
    fn tick_interval_matches_twenty_ticks_per_second() {
        assert_eq!(TICK_INTERVAL.as_millis(), 50);
    }
}
