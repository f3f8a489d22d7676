//! TOML-based configuration for the digitizer service.
//!
//! Read from `/etc/hid-digitizer/config.toml` unless `--config` names another
//! file.  Every field has a default, so an absent file or a partial file is
//! valid:
//!
//! ```toml
//! [devices]
//! pointer_path = "/dev/hidg0"
//! consumer_path = "/dev/hidg1"
//! serial_path = "/dev/ttyGS0"
//! baud_rate = 115200
//!
//! [timing]
//! hold_ms = 50
//! reconnect_delay_secs = 5
//!
//! [pointer]
//! initial_position = "origin"   # or "center"
//! reset_on_start = true
//! reset_on_shutdown = true
//!
//! [service]
//! log_level = "info"
//! ```
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use digitizer_core::InitialPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location read when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hid-digitizer/config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is unusable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub devices: DeviceConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Gadget nodes and the serial command port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    /// HID gadget node receiving Report ID 1 (pointer) frames.
    #[serde(default = "default_pointer_path")]
    pub pointer_path: PathBuf,
    /// HID gadget node receiving Report ID 2 (consumer) frames.  May equal
    /// `pointer_path` for a single composite function.
    #[serde(default = "default_consumer_path")]
    pub consumer_path: PathBuf,
    /// Serial port the host writes commands to.
    #[serde(default = "default_serial_path")]
    pub serial_path: PathBuf,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

impl DeviceConfig {
    /// `true` when both report IDs go to the same node.
    pub fn shares_node(&self) -> bool {
        self.pointer_path == self.consumer_path
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Press-to-release delay for momentary commands, in milliseconds.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    /// Delay before reopening the serial port after a session ends.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl TimingConfig {
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointerConfig {
    #[serde(default)]
    pub initial_position: InitialPosition,
    /// Emit the safe-state frames once the gadget nodes are open.
    #[serde(default = "default_true")]
    pub reset_on_start: bool,
    /// Emit the safe-state frames during graceful shutdown.
    #[serde(default = "default_true")]
    pub reset_on_shutdown: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_pointer_path() -> PathBuf {
    PathBuf::from("/dev/hidg0")
}
fn default_consumer_path() -> PathBuf {
    PathBuf::from("/dev/hidg1")
}
fn default_serial_path() -> PathBuf {
    PathBuf::from("/dev/ttyGS0")
}
fn default_baud_rate() -> u32 {
    115_200
}
fn default_hold_ms() -> u64 {
    50
}
fn default_reconnect_delay_secs() -> u64 {
    5
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            pointer_path: default_pointer_path(),
            consumer_path: default_consumer_path(),
            serial_path: default_serial_path(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            initial_position: InitialPosition::default(),
            reset_on_start: default_true(),
            reset_on_shutdown: default_true(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Rejects values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.devices.baud_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "devices.baud_rate",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.timing.hold_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.hold_ms",
                reason: "a zero hold merges press and release".to_string(),
            });
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// Values are not validated here; callers apply their overrides first and
/// then call [`AppConfig::validate`].
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found"
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str::<AppConfig>(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
