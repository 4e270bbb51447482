//! TOML-based application configuration.
//!
//! Stores timer durations, notification preferences, and the hosted
//! backend's location at `~/.config/halcyon/config.toml`. The backend API
//! key lives in the OS keyring, never in this file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::ConfigError;
use crate::timer::TimerSettings;

fn default_focus() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_true() -> bool {
    true
}

/// Timer duration preferences, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus")]
    pub focus_min: u32,
    #[serde(default = "default_short_break")]
    pub short_break_min: u32,
    #[serde(default = "default_long_break")]
    pub long_break_min: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_min: default_focus(),
            short_break_min: default_short_break(),
            long_break_min: default_long_break(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

/// Where the hosted backend lives and who is signed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Application configuration, serialized to/from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub backend: BackendSettings,
}

impl Config {
    /// Load from the default path; missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, text).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()
    }

    /// Configured durations as live timer settings. Out-of-bounds values in
    /// the file are replaced by the defaults, with a diagnostic.
    pub fn timer_settings(&self) -> TimerSettings {
        let mut settings = TimerSettings::default();
        if let Err(e) = settings.set_focus(self.timer.focus_min) {
            tracing::warn!(error = %e, "ignoring configured focus duration");
        }
        if let Err(e) = settings.set_short_break(self.timer.short_break_min) {
            tracing::warn!(error = %e, "ignoring configured short break duration");
        }
        if let Err(e) = settings.set_long_break(self.timer.long_break_min) {
            tracing::warn!(error = %e, "ignoring configured long break duration");
        }
        settings
    }
}

fn set_json_value_by_path(
    json: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    let mut current = json;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value.parse::<u64>().map_err(|_| {
                        ConfigError::ParseFailed(format!("cannot parse '{value}' as number"))
                    })?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Null => {
                    // Optional fields (backend.base_url, backend.user_id)
                    // deserialize from a plain string.
                    serde_json::Value::String(value.into())
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}

/// Returns `~/.config/halcyon[-dev]/` based on HALCYON_ENV.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HALCYON_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("halcyon-dev")
    } else {
        base_dir.join("halcyon")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gets_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.timer.focus_min, 25);
        assert_eq!(config.timer.short_break_min, 5);
        assert_eq!(config.timer.long_break_min, 15);
        assert!(config.notifications.enabled);
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str("[timer]\nfocus_min = 50\n").unwrap();
        assert_eq!(config.timer.focus_min, 50);
        assert_eq!(config.timer.short_break_min, 5);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.timer.focus_min = 30;
        config.backend.base_url = Some("https://api.example.com".into());
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.timer.focus_min, 30);
        assert_eq!(back.backend.base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let config = Config::default();
        assert_eq!(config.get("timer.focus_min").as_deref(), Some("25"));
        assert_eq!(config.get("notifications.enabled").as_deref(), Some("true"));
        assert!(config.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        set_json_value_by_path(&mut json, "timer.focus_min", "50").unwrap();
        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.timer.focus_min, 50);
    }

    #[test]
    fn set_by_path_fills_optional_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        set_json_value_by_path(&mut json, "backend.base_url", "https://api.example.com").unwrap();
        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.backend.base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn set_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let err = set_json_value_by_path(&mut json, "timer.nope", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn out_of_bounds_durations_fall_back() {
        let config: Config = toml::from_str("[timer]\nfocus_min = 900\n").unwrap();
        let settings = config.timer_settings();
        assert_eq!(settings.focus_min, 25);
    }
}
