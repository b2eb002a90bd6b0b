/*!
 * Tests for application configuration
 */

use anyhow::Result;
use lecturecast::app_config::{Config, LogLevel};
use lecturecast::errors::AppError;
use lecturecast::layout::Theme;
use crate::common;

/// Test the default configuration
#[test]
fn test_default_config_shouldMatchDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.canvas.width, 1280);
    assert_eq!(config.canvas.height, 720);
    assert_eq!(config.canvas.fps, 24);
    assert_eq!(config.canvas.theme, Theme::Dark);
    assert_eq!(config.layout.margin, 80.0);
    assert_eq!(config.layout.bottom_margin(), 140.0);
    assert_eq!(config.layout.title_wrap_chars, 28);
    assert_eq!(config.layout.body_wrap_chars, 50);
    assert_eq!(config.timing.min_caption_secs, 0.8);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test save then load keeps every value
#[test]
fn test_config_saveAndLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.canvas.theme = Theme::Light;
    config.canvas.width = 1920;
    config.canvas.height = 1080;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::load(&path)?;

    assert_eq!(loaded.canvas, config.canvas);
    assert_eq!(loaded.layout, config.layout);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Test missing fields fall back to defaults
#[test]
fn test_config_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "canvas": { "theme": "light" }, "timing": { "min_caption_secs": 1.5 }, "log_level": "warn" }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.canvas.theme, Theme::Light);
    assert_eq!(config.canvas.width, 1280);
    assert_eq!(config.timing.min_caption_secs, 1.5);
    assert_eq!(config.layout.margin, 80.0);
    assert_eq!(config.narration.words_per_minute, 150.0);
    assert_eq!(config.log_level, LogLevel::Warn);
    Ok(())
}

/// Test malformed JSON is reported
#[test]
fn test_config_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

/// Test inconsistent settings are rejected
#[test]
fn test_config_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.canvas.width = 0;
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let mut config = Config::default();
    config.canvas.height = 200;
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let mut config = Config::default();
    config.layout.body_wrap_chars = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.timing.min_caption_secs = -0.1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.narration.words_per_minute = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.layout.margin = -5.0;
    assert!(config.validate().is_err());
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
