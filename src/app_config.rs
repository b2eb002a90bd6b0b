use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::layout::{LayoutConfig, MonospaceMeasurer, Theme};
use crate::narration::WordRateEstimator;
use crate::subtitle::TimingConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Canvas size, theme and frame rate of the produced slides
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Slide geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Glyph advances of the built-in fixed-width measurer
    #[serde(default)]
    pub measure: MonospaceMeasurer,

    /// Caption timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// Narration length estimate used when no durations are supplied
    #[serde(default)]
    pub narration: WordRateEstimator,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Canvas configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    // @field: Width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    // @field: Height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    // @field: Color theme
    #[serde(default)]
    pub theme: Theme,

    // @field: Frame rate handed to the compositor
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            theme: Theme::default(),
            fps: default_fps(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_fps() -> u32 {
    24
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AppError::Config(format!(
                "Canvas size must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }

        let layout = &self.layout;
        if layout.margin < 0.0 || layout.bottom_slack < 0.0 {
            return Err(AppError::Config("Layout margins must not be negative".to_string()));
        }
        if layout.margin * 2.0 >= self.canvas.width as f32
            || layout.margin + layout.bottom_margin() >= self.canvas.height as f32
        {
            return Err(AppError::Config(format!(
                "Layout margins leave no room on a {}x{} canvas",
                self.canvas.width, self.canvas.height
            )));
        }
        if layout.title_wrap_chars == 0 || layout.body_wrap_chars == 0 {
            return Err(AppError::Config("Wrap widths must be at least one character".to_string()));
        }

        if !(self.timing.min_caption_secs >= 0.0) {
            return Err(AppError::Config(format!(
                "Minimum caption duration must not be negative, got {}",
                self.timing.min_caption_secs
            )));
        }

        if !(self.narration.words_per_minute > 0.0) {
            return Err(AppError::Config(format!(
                "Speaking rate must be positive, got {} words per minute",
                self.narration.words_per_minute
            )));
        }

        Ok(())
    }
}
