//! Playground configuration file handling (playground.toml)

use crate::catalog;
use crate::model_view::DEFAULT_MODEL_ASSET;
use motion_theme::ThemeKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name looked up in a directory
pub const CONFIG_FILE_NAME: &str = "playground.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
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

    #[error("unknown animation `{0}` (expected one of pulse, rotate, slide, fade, bounce)")]
    UnknownAnimation(String),

    #[error("speed multiplier must be a positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("headless tick must be at least 1 ms")]
    ZeroTick,

    #[error("headless run must cover at least one frame")]
    ZeroFrames,
}

/// Top-level playground configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub playground: PlaygroundSection,
    #[serde(default)]
    pub viewer: ViewerSection,
    #[serde(default)]
    pub headless: HeadlessSection,
}

/// Initial view-model state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaygroundSection {
    #[serde(default)]
    pub theme: ThemeKind,
    /// Catalog key of the initially selected animation
    #[serde(default = "default_animation")]
    pub animation: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub combine_rotate_pulse: bool,
    #[serde(default)]
    pub use_3d: bool,
}

fn default_animation() -> String {
    "pulse".to_string()
}

fn default_speed() -> f64 {
    1.0
}

impl Default for PlaygroundSection {
    fn default() -> Self {
        Self {
            theme: ThemeKind::default(),
            animation: default_animation(),
            speed: default_speed(),
            combine_rotate_pulse: false,
            use_3d: false,
        }
    }
}

/// 3D viewer settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewerSection {
    /// Binary glTF model shown in 3D mode
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_ASSET)
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

/// Frame clock used when running without a window
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeadlessSection {
    /// Frames to run when no scenario is given
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
}

fn default_frames() -> u32 {
    180
}

fn default_tick_ms() -> u32 {
    16
}

impl Default for HeadlessSection {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl PlaygroundConfig {
    /// Load configuration from a file, or from `playground.toml` in a directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;

        let config: PlaygroundConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
        config.validate()?;

        tracing::debug!(path = %config_path.display(), "loaded playground config");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PlaygroundConfig =
            toml::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if catalog::find(&self.playground.animation).is_none() {
            return Err(ConfigError::UnknownAnimation(
                self.playground.animation.clone(),
            ));
        }
        let speed = self.playground.speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        if self.headless.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.headless.frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PlaygroundConfig::from_toml("").unwrap();
        assert_eq!(config, PlaygroundConfig::default());
        assert_eq!(config.playground.theme, ThemeKind::Neon);
        assert_eq!(config.playground.animation, "pulse");
        assert_eq!(config.viewer.model_path, PathBuf::from("rubiks_cube.glb"));
        assert_eq!(config.headless.tick_ms, 16);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = PlaygroundConfig::from_toml(
            r#"
[playground]
theme = "Pastel"
animation = "Bounce"
speed = 2.5
combine_rotate_pulse = true

[headless]
frames = 30
"#,
        )
        .unwrap();

        assert_eq!(config.playground.theme, ThemeKind::Pastel);
        assert_eq!(config.playground.animation, "Bounce");
        assert_eq!(config.playground.speed, 2.5);
        assert!(config.playground.combine_rotate_pulse);
        assert!(!config.playground.use_3d);
        assert_eq!(config.headless.frames, 30);
        assert_eq!(config.headless.tick_ms, 16);
    }

    #[test]
    fn test_validation_errors() {
        let err = PlaygroundConfig::from_toml("[playground]\nanimation = \"spin\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAnimation(ref k) if k == "spin"));

        let err = PlaygroundConfig::from_toml("[playground]\nspeed = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed(_)));

        let err = PlaygroundConfig::from_toml("[headless]\ntick_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTick));

        let err = PlaygroundConfig::from_toml("[headless]\nframes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFrames));
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = PlaygroundConfig::from_toml("[playground\n").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse <inline>"));
    }

    #[test]
    fn test_toml_round_trip_keeps_theme_name() {
        let mut config = PlaygroundConfig::default();
        config.playground.theme = ThemeKind::Dark;
        let text = config.to_toml().unwrap();
        assert!(text.contains("theme = \"Dark\""));
        assert_eq!(PlaygroundConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[playground]\nuse_3d = true\n",
        )
        .unwrap();

        let config = PlaygroundConfig::load(dir.path()).unwrap();
        assert!(config.playground.use_3d);

        let missing = PlaygroundConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
