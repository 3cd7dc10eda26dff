//! TOML-based configuration for the receiver.
//!
//! Every field has a default, so a missing file or a file that sets only a few
//! keys both work.  Command-line flags are applied on top of whatever this
//! module loads (see `main.rs`).
//!
//! ```toml
//! port = 5000
//! bind_address = "0.0.0.0"
//! device_path = "/dev/hidg0"
//! max_payload_bytes = 256000
//! receive_timeout_ms = 5000
//! key_hold_ms = 5
//! simulate = false
//! log_level = "info"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration loading.
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

    /// A value parsed but cannot be used.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// All runtime settings for the receiver.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReceiverConfig {
    /// IP address to listen on.  `"0.0.0.0"` accepts senders on every interface.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// HID gadget character device.
    #[serde(default = "default_device_path")]
    pub device_path: PathBuf,
    /// Largest accepted message in bytes; one byte more aborts the connection.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Longest the receiver waits for the next chunk from a sender.
    #[serde(default = "default_receive_timeout_ms")]
    pub receive_timeout_ms: u64,
    /// Pause after each press and each release report.
    #[serde(default = "default_key_hold_ms")]
    pub key_hold_ms: u64,
    /// Use the no-op sink instead of opening the device.
    #[serde(default)]
    pub simulate: bool,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bind_address() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}
fn default_port() -> u16 {
    5000
}
fn default_device_path() -> PathBuf {
    PathBuf::from("/dev/hidg0")
}
fn default_max_payload_bytes() -> usize {
    256_000
}
fn default_receive_timeout_ms() -> u64 {
    5_000
}
fn default_key_hold_ms() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            device_path: default_device_path(),
            max_payload_bytes: default_max_payload_bytes(),
            receive_timeout_ms: default_receive_timeout_ms(),
            key_hold_ms: default_key_hold_ms(),
            simulate: false,
            log_level: default_log_level(),
        }
    }
}

impl ReceiverConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    /// Rejects settings that would make every connection fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_payload_bytes",
                reason: "must be greater than zero",
            });
        }
        if self.receive_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "receive_timeout_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Loads the config file at `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ReceiverConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ReceiverConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        // Arrange / Act
        let cfg = ReceiverConfig::default();

        // Assert
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.device_path, PathBuf::from("/dev/hidg0"));
        assert_eq!(cfg.max_payload_bytes, 256_000);
        assert_eq!(cfg.receive_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.key_hold(), Duration::from_millis(5));
        assert!(!cfg.simulate);
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_keys() {
        // Arrange
        let toml_str = "port = 6000\nsimulate = true\n";

        // Act
        let cfg: ReceiverConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(cfg.port, 6000);
        assert!(cfg.simulate);
        assert_eq!(cfg.max_payload_bytes, 256_000);
        assert_eq!(cfg.device_path, PathBuf::from("/dev/hidg0"));
    }

    #[test]
    fn test_empty_toml_equals_default() {
        let cfg: ReceiverConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ReceiverConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("linuxkey-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("linuxkey-definitely-missing/config.toml");
        assert_eq!(load_config(&path).unwrap(), ReceiverConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let cfg = ReceiverConfig {
            max_payload_bytes: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "max_payload_bytes", .. })
        ));

        let cfg = ReceiverConfig {
            receive_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "receive_timeout_ms", .. })
        ));

        assert!(ReceiverConfig::default().validate().is_ok());
    }
}
