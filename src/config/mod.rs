//! Dashboard configuration.
//!
//! Loaded once at startup from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "timezones": [
//!     { "name": "UTC", "location": "UTC" },
//!     { "name": "Philippine Time", "location": "Asia/Manila" }
//!   ],
//!   "tick_interval_ms": 1000,
//!   "stats_interval_ms": 2000,
//!   "notification_secs": 3,
//!   "metrics_interval_ms": 5000,
//!   "log_path": "/tmp/clockwall.log",
//!   "log_max_bytes": 1048576,
//!   "ascii_borders": false
//! }
//! ```
//!
//! The file is looked up at `--config PATH`, then `$CLOCKWALL_CONFIG`, then
//! `$HOME/.config/clockwall/config.json`. A missing file means defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{BorderSet, RendererSettings};
use crate::timezone::TimezoneSlot;

pub const CONFIG_ENV: &str = "CLOCKWALL_CONFIG";
const CONFIG_RELATIVE: &str = ".config/clockwall/config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no timezones configured")]
    NoTimezones,
    #[error("`{0}` must be greater than zero")]
    ZeroInterval(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub timezones: Vec<TimezoneSlot>,
    pub tick_interval_ms: u64,
    pub stats_interval_ms: u64,
    pub notification_secs: u64,
    /// Interval between metrics log snapshots; 0 disables them.
    pub metrics_interval_ms: u64,
    pub log_path: Option<PathBuf>,
    pub log_max_bytes: u64,
    /// Draw pane frames with `+-|` for terminals without box-drawing glyphs.
    pub ascii_borders: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezones: default_timezones(),
            tick_interval_ms: 1_000,
            stats_interval_ms: 2_000,
            notification_secs: 3,
            metrics_interval_ms: 5_000,
            log_path: None,
            log_max_bytes: 1024 * 1024,
            ascii_borders: false,
        }
    }
}

/// UTC in focus, then six common zones.
pub fn default_timezones() -> Vec<TimezoneSlot> {
    [
        ("UTC", "UTC"),
        ("PST/DST", "America/Los_Angeles"),
        ("GMT", "Etc/GMT"),
        ("Philippine Time", "Asia/Manila"),
        ("CST", "America/Chicago"),
        ("MST", "America/Denver"),
        ("EST", "America/New_York"),
    ]
    .into_iter()
    .map(|(name, location)| TimezoneSlot::new(name, location))
    .collect()
}

impl DashboardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json_str(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Resolve the config location and load it. No resolvable location at
    /// all also means defaults.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        match resolve_path(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timezones.is_empty() {
            return Err(ConfigError::NoTimezones);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick_interval_ms"));
        }
        if self.stats_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("stats_interval_ms"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.stats_interval_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_interval_ms)
    }

    pub fn renderer_settings(&self) -> RendererSettings {
        let border = if self.ascii_borders {
            BorderSet::ASCII
        } else {
            BorderSet::LIGHT
        };
        RendererSettings { border }
    }
}

pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    resolve_path_with(
        explicit,
        std::env::var_os(CONFIG_ENV),
        std::env::var_os("HOME"),
    )
}

fn resolve_path_with(
    explicit: Option<PathBuf>,
    env_override: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    explicit
        .or_else(|| env_override.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| {
            home.filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(CONFIG_RELATIVE))
        })
}
