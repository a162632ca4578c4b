//! Application configuration (window, capture timing). Loaded from config.ron at startup.

use menu::CaptureTiming;
use serde::{Deserialize, Serialize};

/// Persistent settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Seconds between dismissing the menu and the first capture request.
    #[serde(default = "default_capture_delay")]
    pub capture_delay: f32,
    /// Seconds to wait on an asynchronous capture grant before retrying.
    #[serde(default = "default_grant_timeout")]
    pub capture_grant_timeout: f32,
    /// Seconds between capture retries, scaled by the attempt number.
    #[serde(default = "default_retry_backoff")]
    pub capture_retry_backoff: f32,
    /// Capture attempts before giving up and reopening the menu.
    #[serde(default = "default_max_attempts")]
    pub capture_max_attempts: u32,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_capture_delay() -> f32 {
    0.5
}
fn default_grant_timeout() -> f32 {
    2.0
}
fn default_retry_backoff() -> f32 {
    0.75
}
fn default_max_attempts() -> u32 {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            capture_delay: default_capture_delay(),
            capture_grant_timeout: default_grant_timeout(),
            capture_retry_backoff: default_retry_backoff(),
            capture_max_attempts: default_max_attempts(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. A missing file seeds the defaults on
    /// disk; an invalid file falls back to defaults with a warning.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(_) => {
                let config = Self::default();
                config.save();
                return config;
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Capture timing knobs for the menu controller.
    pub fn capture_timing(&self) -> CaptureTiming {
        CaptureTiming {
            safety_delay: self.capture_delay,
            grant_timeout: self.capture_grant_timeout,
            retry_backoff: self.capture_retry_backoff,
            max_attempts: self.capture_max_attempts,
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}
