// SPDX-License-Identifier: MPL-2.0
//! Viewer timing and layout preferences, loaded from a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use focus_lens::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.auto_hide_delay_ms = Some(3000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "FocusLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auto_hide_delay_ms: Option<u64>,
    #[serde(default)]
    pub overlay_fade_ms: Option<u64>,
    #[serde(default)]
    pub zoom_animation_ms: Option<u64>,
    #[serde(default)]
    pub double_tap_window_ms: Option<u64>,
    #[serde(default)]
    pub control_margin: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_hide_delay_ms: Some(DEFAULT_AUTO_HIDE_DELAY_MS),
            overlay_fade_ms: Some(DEFAULT_OVERLAY_FADE_MS),
            zoom_animation_ms: Some(DEFAULT_ZOOM_ANIMATION_MS),
            double_tap_window_ms: Some(DEFAULT_DOUBLE_TAP_WINDOW_MS),
            control_margin: Some(DEFAULT_CONTROL_MARGIN),
        }
    }
}

impl Config {
    /// Auto-hide delay, clamped to the supported range.
    #[must_use]
    pub fn auto_hide_delay(&self) -> Duration {
        let ms = self
            .auto_hide_delay_ms
            .unwrap_or(DEFAULT_AUTO_HIDE_DELAY_MS)
            .clamp(MIN_AUTO_HIDE_DELAY_MS, MAX_AUTO_HIDE_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn overlay_fade(&self) -> Duration {
        let ms = self
            .overlay_fade_ms
            .unwrap_or(DEFAULT_OVERLAY_FADE_MS)
            .min(MAX_OVERLAY_FADE_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn zoom_animation(&self) -> Duration {
        let ms = self
            .zoom_animation_ms
            .unwrap_or(DEFAULT_ZOOM_ANIMATION_MS)
            .min(MAX_ZOOM_ANIMATION_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn double_tap_window(&self) -> Duration {
        let ms = self
            .double_tap_window_ms
            .unwrap_or(DEFAULT_DOUBLE_TAP_WINDOW_MS)
            .clamp(MIN_DOUBLE_TAP_WINDOW_MS, MAX_DOUBLE_TAP_WINDOW_MS);
        Duration::from_millis(ms)
    }

    /// Scrubber margin in points. Non-finite values fall back to the default.
    #[must_use]
    pub fn control_margin(&self) -> f32 {
        match self.control_margin {
            Some(margin) if margin.is_finite() => margin.clamp(0.0, MAX_CONTROL_MARGIN),
            _ => DEFAULT_CONTROL_MARGIN,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a config file. Malformed TOML yields the defaults with a warning.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_timings() {
        let config = Config {
            auto_hide_delay_ms: Some(2500),
            overlay_fade_ms: Some(200),
            zoom_animation_ms: Some(300),
            double_tap_window_ms: Some(250),
            control_margin: Some(8.0),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "overlay_fade_ms = 100\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.overlay_fade(), Duration::from_millis(100));
        assert_eq!(
            loaded.auto_hide_delay(),
            Duration::from_millis(DEFAULT_AUTO_HIDE_DELAY_MS)
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config {
            auto_hide_delay_ms: Some(1),
            overlay_fade_ms: Some(u64::MAX),
            zoom_animation_ms: None,
            double_tap_window_ms: Some(10_000),
            control_margin: Some(f32::NAN),
        };

        assert_eq!(
            config.auto_hide_delay(),
            Duration::from_millis(MIN_AUTO_HIDE_DELAY_MS)
        );
        assert_eq!(
            config.overlay_fade(),
            Duration::from_millis(MAX_OVERLAY_FADE_MS)
        );
        assert_eq!(
            config.zoom_animation(),
            Duration::from_millis(DEFAULT_ZOOM_ANIMATION_MS)
        );
        assert_eq!(
            config.double_tap_window(),
            Duration::from_millis(MAX_DOUBLE_TAP_WINDOW_MS)
        );
        assert_eq!(config.control_margin(), DEFAULT_CONTROL_MARGIN);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
