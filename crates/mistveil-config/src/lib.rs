//! Configuration for mistveil.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional; anything missing falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mistveil_core::{AnimationSpeed, MaskParameters, ProgressCurve};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Largest accepted noise field edge.
pub const MAX_NOISE_SIZE: usize = 4096;

/// Errors raised while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for every random source. `None` picks one at startup.
    pub seed: Option<u64>,
    /// Edge length of the noise field.
    pub noise_size: usize,
    /// Scroll offset at which the mist starts rising.
    pub transition_start: f32,
    /// Scroll distance over which the mist completes.
    pub transition_duration: f32,
    /// Scroll distance per key press or wheel notch.
    pub scroll_step: f32,
    /// Scroll-level easing curve.
    pub curve: ProgressCurve,
    /// Apply the second, in-mask easing pass.
    pub compound_easing: bool,
    /// Ambient animation speed.
    pub speed: AnimationSpeed,
    /// Draw falling snow.
    pub snow: bool,
    /// Draw the floating label.
    pub label: bool,
    /// Text of the floating label.
    pub label_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            noise_size: 256,
            transition_start: 0.1,
            transition_duration: 0.05,
            scroll_step: 0.005,
            curve: ProgressCurve::default(),
            compound_easing: true,
            speed: AnimationSpeed::default(),
            snow: true,
            label: true,
            label_text: "Into the mist".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "mistveil", "mistveil")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Reject values the effects cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.noise_size == 0 || self.noise_size > MAX_NOISE_SIZE {
            return Err(ConfigError::Invalid {
                field: "noise_size",
                reason: format!("{} is outside 1..={MAX_NOISE_SIZE}", self.noise_size),
            });
        }
        if !self.transition_start.is_finite() {
            return Err(ConfigError::Invalid {
                field: "transition_start",
                reason: "must be a finite number".to_string(),
            });
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(ConfigError::Invalid {
                field: "transition_duration",
                reason: format!("{} must be zero or positive", self.transition_duration),
            });
        }
        if !self.scroll_step.is_finite() || self.scroll_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "scroll_step",
                reason: format!("{} must be positive", self.scroll_step),
            });
        }
        Ok(())
    }

    /// Mask parameters for a terminal of the given size.
    pub fn mask_parameters(&self, columns: u16, rows: u16) -> MaskParameters {
        MaskParameters {
            transition_start: self.transition_start,
            transition_duration: self.transition_duration,
            curve: self.curve,
            compound_easing: self.compound_easing,
            ..MaskParameters::default()
        }
        .with_terminal_size(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            seed: Some(1234),
            noise_size: 128,
            curve: ProgressCurve::Continuous,
            speed: AnimationSpeed::Fast,
            label_text: "Summit".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "speed = \"slow\"\ncurve = \"continuous\"\nsnow = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.speed, AnimationSpeed::Slow);
        assert_eq!(config.curve, ProgressCurve::Continuous);
        assert!(!config.snow);
        assert_eq!(config.noise_size, 256);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "noise_size = \"big\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validation() {
        let negative = Config {
            transition_duration: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::Invalid {
                field: "transition_duration",
                ..
            })
        ));

        let zero_size = Config {
            noise_size: 0,
            ..Config::default()
        };
        assert!(zero_size.validate().is_err());

        let step = Config {
            transition_duration: 0.0,
            ..Config::default()
        };
        assert!(step.validate().is_ok());
    }

    #[test]
    fn test_mask_parameters() {
        let config = Config {
            compound_easing: false,
            ..Config::default()
        };
        let params = config.mask_parameters(100, 25);
        assert_eq!(params.viewport_width, 100.0);
        assert_eq!(params.viewport_height, 50.0);
        assert!(!params.compound_easing);
        assert_eq!(params.transition_start, 0.1);
    }
}
