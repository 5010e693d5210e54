//! Configuration loading.
//!
//! # File format
//!
//! A flat TOML table.  Every key is optional.
//!
//! ```toml
//! cooldown_millis        = 10000
//! aggression_radius      = 10.0
//! follow_range           = 64.0
//! allowed_mobs           = ["zombie", "skeleton", "CAVE_SPIDER"]
//! debug                  = false
//! monitor_interval_ticks = 20
//! ```
//!
//! | Key                      | Type      | Default | Accepted range        |
//! |--------------------------|-----------|---------|-----------------------|
//! | `cooldown_millis`        | integer   | 10000   | ≥ 0                   |
//! | `aggression_radius`      | float     | 10.0    | finite, > 0           |
//! | `follow_range`           | float     | 64.0    | finite, ≥ 0           |
//! | `allowed_mobs`           | [string]  | `[]`    | hostile, spawnable    |
//! | `debug`                  | bool      | false   |                       |
//! | `monitor_interval_ticks` | integer   | 20      | ≥ 1                   |
//!
//! Loading is lenient per key: a value of the wrong type or out of range is
//! replaced by its default, an unknown or ineligible mob name is dropped, and
//! each such fix-up is logged with `tracing::warn!`.  Only an unreadable file
//! or broken TOML syntax is an error.

use std::path::Path;

use serde::Serialize;
use toml::{Table, Value};

use crate::{AlertParameters, AllowedKinds, ConfigError, ConfigResult};

// ── Raw settings ──────────────────────────────────────────────────────────────

/// The config file as written, before validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlertSettings {
    pub cooldown_millis:        i64,
    pub aggression_radius:      f64,
    pub follow_range:           f64,
    pub allowed_mobs:           Vec<String>,
    pub debug:                  bool,
    pub monitor_interval_ticks: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            cooldown_millis:        AlertParameters::DEFAULT_COOLDOWN_MS as i64,
            aggression_radius:      AlertParameters::DEFAULT_AGGRESSION_RADIUS,
            follow_range:           AlertParameters::DEFAULT_FOLLOW_RANGE,
            allowed_mobs:           Vec::new(),
            debug:                  false,
            monitor_interval_ticks: AlertParameters::DEFAULT_MONITOR_INTERVAL_TICKS as i64,
        }
    }
}

impl AlertSettings {
    /// Read settings from a parsed table, one key at a time.
    pub fn from_table(table: &Table) -> Self {
        let defaults = Self::default();
        let mut settings = defaults.clone();

        for (key, value) in table {
            match key.as_str() {
                "cooldown_millis" => {
                    settings.cooldown_millis = integer(key, value).unwrap_or(defaults.cooldown_millis);
                }
                "aggression_radius" => {
                    settings.aggression_radius = float(key, value).unwrap_or(defaults.aggression_radius);
                }
                "follow_range" => {
                    settings.follow_range = float(key, value).unwrap_or(defaults.follow_range);
                }
                "allowed_mobs" => {
                    settings.allowed_mobs = string_list(key, value);
                }
                "debug" => {
                    settings.debug = match value {
                        Value::Boolean(b) => *b,
                        other => {
                            tracing::warn!("config key {key} expects a boolean, got {}; using default", other.type_str());
                            defaults.debug
                        }
                    };
                }
                "monitor_interval_ticks" => {
                    settings.monitor_interval_ticks =
                        integer(key, value).unwrap_or(defaults.monitor_interval_ticks);
                }
                unknown => tracing::warn!("ignoring unknown config key {unknown}"),
            }
        }
        settings
    }

    /// Parse TOML text leniently.  Fails only on syntax errors.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let table: Table = toml::from_str(text)?;
        Ok(Self::from_table(&table))
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn integer(key: &str, value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        other => {
            tracing::warn!("config key {key} expects an integer, got {}; using default", other.type_str());
            None
        }
    }
}

fn float(key: &str, value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        other => {
            tracing::warn!("config key {key} expects a number, got {}; using default", other.type_str());
            None
        }
    }
}

fn string_list(key: &str, value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        tracing::warn!("config key {key} expects a list of names, got {}; using none", value.type_str());
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            other => {
                tracing::warn!("skipping non-string entry {other} in {key}");
                None
            }
        })
        .collect()
}

// ── Validated config ──────────────────────────────────────────────────────────

/// Everything the alert engine reads from configuration, validated.
///
/// Published as a whole: a reload builds a new `AlertConfig` and swaps it in,
/// so readers never see a mix of old and new values.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertConfig {
    pub params:  AlertParameters,
    pub allowed: AllowedKinds,
    /// Verbose logging of every alert and acquisition.  No behavioral effect.
    pub debug:   bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            params:  AlertParameters::default(),
            allowed: AllowedKinds::new(),
            debug:   false,
        }
    }
}

impl AlertConfig {
    /// Validate raw settings, substituting defaults for out-of-range values.
    pub fn from_settings(settings: &AlertSettings) -> Self {
        let defaults = AlertParameters::default();

        let cooldown_ms = u64::try_from(settings.cooldown_millis).unwrap_or_else(|_| {
            tracing::warn!(
                "cooldown_millis must be >= 0, got {}; using {}",
                settings.cooldown_millis, defaults.cooldown_ms
            );
            defaults.cooldown_ms
        });

        let aggression_radius = if settings.aggression_radius.is_finite() && settings.aggression_radius > 0.0 {
            settings.aggression_radius
        } else {
            tracing::warn!(
                "aggression_radius must be > 0, got {}; using {}",
                settings.aggression_radius, defaults.aggression_radius
            );
            defaults.aggression_radius
        };

        let follow_range_boost = if settings.follow_range.is_finite() && settings.follow_range >= 0.0 {
            settings.follow_range
        } else {
            tracing::warn!(
                "follow_range must be >= 0, got {}; using {}",
                settings.follow_range, defaults.follow_range_boost
            );
            defaults.follow_range_boost
        };

        let monitor_interval_ticks = match u64::try_from(settings.monitor_interval_ticks) {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!(
                    "monitor_interval_ticks must be >= 1, got {}; using {}",
                    settings.monitor_interval_ticks, defaults.monitor_interval_ticks
                );
                defaults.monitor_interval_ticks
            }
        };

        let (allowed, rejected) = AllowedKinds::from_names(&settings.allowed_mobs);
        for rejection in &rejected {
            tracing::warn!("{rejection}");
        }
        tracing::info!("allowed mobs: {:?}", allowed.sorted());

        Self {
            params: AlertParameters {
                cooldown_ms,
                aggression_radius,
                follow_range_boost,
                monitor_interval_ticks,
            },
            allowed,
            debug: settings.debug,
        }
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        AlertSettings::from_toml_str(text).map(|s| Self::from_settings(&s))
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Write the default settings to `path` unless a file is already there.
    ///
    /// Returns `true` if a file was written.
    pub fn write_default(path: &Path) -> ConfigResult<bool> {
        if path.exists() {
            return Ok(false);
        }
        let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = AlertSettings::default().to_toml_string()?;
        std::fs::write(path, text).map_err(io_err)?;
        tracing::info!("wrote default config to {}", path.display());
        Ok(true)
    }
}
