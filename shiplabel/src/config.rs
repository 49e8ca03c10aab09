//! INI configuration file.
//!
//! ```ini
//! [logging]
//! level = info
//! directory = /var/log/shiplabel
//!
//! [gateway]
//! ups_url = https://gateway.example.com/ups
//! seur_url = https://gateway.example.com/seur
//! timeout_secs = 30
//!
//! [defaults]
//! length = 30
//! width = 30
//! height = 30
//!
//! [store]
//! snapshot = /srv/shiplabel/store.json
//! ```
//!
//! Every key is optional; missing keys take their default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::model::Dimensions;

const CONFIG_DIR: &str = "shiplabel";
const CONFIG_FILE: &str = "config.ini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors loading, saving or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `shiplabel=debug`.
    pub level: String,
    /// Directory for a daily log file; stderr only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

/// `[gateway]` section: carrier gateway endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub ups_url: Option<String>,
    pub seur_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            ups_url: None,
            seur_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsSettings {
    /// Parcel dimensions sent when a shipment declares none.
    pub dimensions: Dimensions,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSettings {
    /// JSON snapshot used by the command line tool.
    pub snapshot: Option<PathBuf>,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub logging: LoggingSettings,
    pub gateway: GatewaySettings,
    pub defaults: DefaultsSettings,
    pub store: StoreSettings,
}

/// Default location of the configuration file.
///
/// `~/.config/shiplabel/config.ini` on Linux; falls back to the current
/// directory when the platform has no config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

impl ConfigFile {
    /// Load from [`config_file_path`]. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.section(Some(key.section())).and_then(|s| s.get(key.key_name())) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save to [`config_file_path`], creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating its directory. Unset keys are omitted.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    pub fn with_log_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.logging.directory = Some(directory.into());
        self
    }

    pub fn with_ups_url(mut self, url: impl Into<String>) -> Self {
        self.gateway.ups_url = Some(url.into());
        self
    }

    pub fn with_seur_url(mut self, url: impl Into<String>) -> Self {
        self.gateway.seur_url = Some(url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.gateway.timeout_secs = timeout_secs;
        self
    }

    pub fn with_default_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.defaults.dimensions = dimensions;
        self
    }

    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.snapshot = Some(path.into());
        self
    }
}

/// A `section.key` setting of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    LoggingLevel,
    LoggingDirectory,
    GatewayUpsUrl,
    GatewaySeurUrl,
    GatewayTimeoutSecs,
    DefaultsLength,
    DefaultsWidth,
    DefaultsHeight,
    StoreSnapshot,
}

impl ConfigKey {
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
            ConfigKey::GatewayUpsUrl,
            ConfigKey::GatewaySeurUrl,
            ConfigKey::GatewayTimeoutSecs,
            ConfigKey::DefaultsLength,
            ConfigKey::DefaultsWidth,
            ConfigKey::DefaultsHeight,
            ConfigKey::StoreSnapshot,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
            ConfigKey::GatewayUpsUrl
            | ConfigKey::GatewaySeurUrl
            | ConfigKey::GatewayTimeoutSecs => "gateway",
            ConfigKey::DefaultsLength | ConfigKey::DefaultsWidth | ConfigKey::DefaultsHeight => {
                "defaults"
            }
            ConfigKey::StoreSnapshot => "store",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::GatewayUpsUrl => "ups_url",
            ConfigKey::GatewaySeurUrl => "seur_url",
            ConfigKey::GatewayTimeoutSecs => "timeout_secs",
            ConfigKey::DefaultsLength => "length",
            ConfigKey::DefaultsWidth => "width",
            ConfigKey::DefaultsHeight => "height",
            ConfigKey::StoreSnapshot => "snapshot",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        fn path(p: &Option<PathBuf>) -> String {
            p.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
        }

        match self {
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => path(&config.logging.directory),
            ConfigKey::GatewayUpsUrl => config.gateway.ups_url.clone().unwrap_or_default(),
            ConfigKey::GatewaySeurUrl => config.gateway.seur_url.clone().unwrap_or_default(),
            ConfigKey::GatewayTimeoutSecs => config.gateway.timeout_secs.to_string(),
            ConfigKey::DefaultsLength => config.defaults.dimensions.length.to_string(),
            ConfigKey::DefaultsWidth => config.defaults.dimensions.width.to_string(),
            ConfigKey::DefaultsHeight => config.defaults.dimensions.height.to_string(),
            ConfigKey::StoreSnapshot => path(&config.store.snapshot),
        }
    }

    /// Set from text. An empty value clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

        match self {
            ConfigKey::LoggingLevel => {
                config.logging.level = if value.is_empty() {
                    DEFAULT_LOG_LEVEL.to_string()
                } else {
                    value.to_string()
                }
            }
            ConfigKey::LoggingDirectory => config.logging.directory = optional(value).map(PathBuf::from),
            ConfigKey::GatewayUpsUrl => config.gateway.ups_url = optional(value),
            ConfigKey::GatewaySeurUrl => config.gateway.seur_url = optional(value),
            ConfigKey::GatewayTimeoutSecs => {
                config.gateway.timeout_secs = self.parse_positive(value)? as u64
            }
            ConfigKey::DefaultsLength => config.defaults.dimensions.length = self.parse_positive(value)?,
            ConfigKey::DefaultsWidth => config.defaults.dimensions.width = self.parse_positive(value)?,
            ConfigKey::DefaultsHeight => config.defaults.dimensions.height = self.parse_positive(value)?,
            ConfigKey::StoreSnapshot => config.store.snapshot = optional(value).map(PathBuf::from),
        }
        Ok(())
    }

    fn parse_positive(&self, value: &str) -> Result<f64, ConfigError> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: self.name(),
                value: value.to_string(),
            })
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
