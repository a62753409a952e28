//! Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::command::{ConvertSettings, DEFAULT_PATTERN};
use crate::engine::options::{Crf, EncodingOptions, FrameRate, Resolution, SpeedPreset};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub encoder: EncoderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default CRF (0-51)
    #[serde(default)]
    pub quality: Crf,

    /// "no change" or one of the preset sizes, e.g. "1280x720"
    #[serde(default)]
    pub resolution: Resolution,

    #[serde(default)]
    pub preset: SpeedPreset,

    /// "auto" or a fixed rate such as 30
    #[serde(default)]
    pub frame_rate: FrameRate,

    /// Output directory (defaults to the input file's directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Filename pattern for output files
    /// Supports: {basename}, {filename}, {source}, {target}
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,

    /// Whether to overwrite existing output files
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// ffmpeg executable name or path
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

fn default_filename_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            quality: Crf::default(),
            resolution: Resolution::Unchanged,
            preset: SpeedPreset::default(),
            frame_rate: FrameRate::AUTO,
            output_dir: None,
            filename_pattern: default_filename_pattern(),
            overwrite: false,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

impl DefaultsConfig {
    /// Starting values for the video option form
    pub fn encoding_options(&self) -> EncodingOptions {
        EncodingOptions {
            quality: self.quality,
            resolution: self.resolution,
            preset: self.preset,
            frame_rate: self.frame_rate,
            ..EncodingOptions::default()
        }
    }

    pub fn convert_settings(&self) -> ConvertSettings {
        ConvertSettings {
            output_dir: self.output_dir.clone(),
            filename_pattern: Some(self.filename_pattern.clone()),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("mediarage")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("mediarage")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();

            // Not fatal: an unwritable config dir still leaves the built-in defaults
            if let Err(e) = config.save() {
                tracing::warn!(
                    "Could not create default config file: {:#}. Using built-in defaults; run 'mediarage init-config' to create one.",
                    e
                );
            }

            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Create a default config file if it doesn't exist
    pub fn ensure_default() -> Result<()> {
        if !Self::exists() {
            let config = Config::default();
            config.save()?;
        }
        Ok(())
    }
}
