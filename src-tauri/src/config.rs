//! Persistent configuration handling for Headset.
//!
//! Persists configuration in a JSON file:
//! `~/.config/headset/config.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::bridge::script::{is_js_identifier, DEFAULT_EVENT_BUS_GLOBAL};
use crate::bridge::DeliveryMode;

const APP_CONFIG_DIR_NAME: &str = "headset";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_ACK_TIMEOUT_MS: u64 = 1500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Some(Self::Error),
            "WARN" | "WARNING" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    delivery: Option<String>,
    #[serde(default)]
    event_bus_global: Option<String>,
    #[serde(default)]
    require_ack: Option<bool>,
    #[serde(default)]
    ack_timeout_ms: Option<u64>,
}

/// Resolved bridge settings. Managed as Tauri state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    pub log_level: LogLevel,
    pub delivery: DeliveryMode,
    pub event_bus_global: String,
    pub require_ack: bool,
    pub ack_timeout: Duration,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            delivery: DeliveryMode::default(),
            event_bus_global: DEFAULT_EVENT_BUS_GLOBAL.to_string(),
            require_ack: false,
            ack_timeout: Duration::from_millis(DEFAULT_ACK_TIMEOUT_MS),
        }
    }
}

impl BridgeSettings {
    /// Acknowledgements need the structured channel; the script form has no reply path.
    pub fn ack_applies(&self) -> bool {
        self.require_ack && self.delivery == DeliveryMode::Message
    }
}

impl From<RawConfig> for BridgeSettings {
    fn from(raw: RawConfig) -> Self {
        let defaults = Self::default();

        let log_level = match raw.log_level.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => LogLevel::from_str(s).unwrap_or_else(|| {
                warn!(log_level = s, "Unknown log level, using default");
                defaults.log_level
            }),
            None => defaults.log_level,
        };

        let delivery = match raw.delivery.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => DeliveryMode::from_str(s).unwrap_or_else(|| {
                warn!(delivery = s, "Unknown delivery mode, using default");
                defaults.delivery
            }),
            None => defaults.delivery,
        };

        let event_bus_global = match raw.event_bus_global.filter(|s| !s.is_empty()) {
            Some(name) if is_js_identifier(&name) => name,
            Some(name) => {
                warn!(event_bus_global = %name, "Event bus global is not a JS identifier, using default");
                defaults.event_bus_global
            }
            None => defaults.event_bus_global,
        };

        let ack_timeout = raw
            .ack_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.ack_timeout);

        Self {
            log_level,
            delivery,
            event_bus_global,
            require_ack: raw.require_ack.unwrap_or(defaults.require_ack),
            ack_timeout,
        }
    }
}

impl From<&BridgeSettings> for RawConfig {
    fn from(settings: &BridgeSettings) -> Self {
        Self {
            log_level: Some(settings.log_level.as_filter().to_string()),
            delivery: Some(settings.delivery.as_str().to_string()),
            event_bus_global: Some(settings.event_bus_global.clone()),
            require_ack: Some(settings.require_ack),
            ack_timeout_ms: Some(settings.ack_timeout.as_millis() as u64),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let path = config_dir()?
        .join(APP_CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    Some(path)
}

fn ensure_config_dir_exists(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn load_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    if !path.exists() {
        debug!(?path, "Config file does not exist, using defaults");
        return Ok(RawConfig::default());
    }

    let data = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&data)?;
    debug!(?path, "Config loaded");
    Ok(cfg)
}

/// Loads settings from `path`; a missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<BridgeSettings, ConfigError> {
    Ok(load_raw_config(path)?.into())
}

pub fn save_settings_to(path: &Path, settings: &BridgeSettings) -> Result<(), ConfigError> {
    ensure_config_dir_exists(path)?;
    let data = serde_json::to_string_pretty(&RawConfig::from(settings))?;
    fs::write(path, data)?;
    debug!(?path, "Config saved");
    Ok(())
}

/// Loads settings from the platform config file, falling back to defaults on any error.
/// Writes the defaults on first run so the file can be edited by hand.
///
/// Runs before the tracing subscriber exists, so failures go to stderr.
pub fn load_settings() -> BridgeSettings {
    let Some(path) = config_path() else {
        eprintln!("Config: {}, using defaults", ConfigError::NoConfigDir);
        return BridgeSettings::default();
    };
    if !path.exists() {
        let defaults = BridgeSettings::default();
        if let Err(err) = save_settings_to(&path, &defaults) {
            eprintln!("Config: failed to write defaults to {}: {err}", path.display());
        }
        return defaults;
    }
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Config: failed to load {}, using defaults: {err}", path.display());
            BridgeSettings::default()
        }
    }
}
