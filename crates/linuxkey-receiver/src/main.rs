//! LinuxKey receiver entry point.
//!
//! Listens on TCP for UTF-8 text and types it through the USB HID gadget
//! keyboard at `/dev/hidg0` (or wherever `--hid-path` points).
//!
//! # Usage
//!
//! ```text
//! linuxkey-receiver [OPTIONS] [PORT]
//!
//! Options:
//!   --config    <FILE>   TOML config file
//!   --port      <PORT>   TCP port to listen on [default: 5000]
//!   --bind      <IP>     Address to listen on [default: 0.0.0.0]
//!   --hid-path  <PATH>   HID gadget device [default: /dev/hidg0]
//!   --max-bytes <N>      Largest accepted message [default: 256000]
//!   --hold-ms   <MS>     Pause after each report [default: 5]
//!   --emulate            Log the text instead of typing it
//! ```
//!
//! A bare `PORT` argument is accepted as a shorthand for `--port`.
//!
//! # Environment variable overrides
//!
//! | Variable             | Default      | Description              |
//! |----------------------|--------------|--------------------------|
//! | `LINUXKEY_CONFIG`    | *(none)*     | TOML config file         |
//! | `LINUXKEY_PORT`      | `5000`       | TCP listener port        |
//! | `LINUXKEY_BIND`      | `0.0.0.0`    | Listener address         |
//! | `LINUXKEY_HID_PATH`  | `/dev/hidg0` | HID gadget device        |
//! | `LINUXKEY_MAX_BYTES` | `256000`     | Payload limit in bytes   |
//! | `LINUXKEY_HOLD_MS`   | `5`          | Pause after each report  |
//! | `LINUXKEY_EMULATE`   | `false`      | Use the simulated sink   |
//!
//! Values given on the command line win over the config file, which wins over
//! the built-in defaults.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linuxkey_receiver::application::dispatch_text::TextDispatcher;
use linuxkey_receiver::application::emit_keystroke::KeystrokeEmitter;
use linuxkey_receiver::infrastructure::config::{load_config, ReceiverConfig};
use linuxkey_receiver::infrastructure::hid_sink::open_sink;
use linuxkey_receiver::infrastructure::network::ReceiverServer;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// LinuxKey receiver.
///
/// Types text received over TCP through a Linux USB HID gadget keyboard.
#[derive(Debug, Parser)]
#[command(
    name = "linuxkey-receiver",
    about = "Types text received over TCP through a USB HID gadget keyboard",
    version
)]
struct Cli {
    /// TOML config file.  A path that does not exist is treated as empty.
    #[arg(long, env = "LINUXKEY_CONFIG")]
    config: Option<PathBuf>,

    /// TCP port to listen on (positional form).
    #[arg(value_name = "PORT")]
    port_arg: Option<u16>,

    /// TCP port to listen on.
    #[arg(long, env = "LINUXKEY_PORT")]
    port: Option<u16>,

    /// IP address to listen on.
    #[arg(long, env = "LINUXKEY_BIND")]
    bind: Option<IpAddr>,

    /// HID gadget character device.
    #[arg(long, env = "LINUXKEY_HID_PATH")]
    hid_path: Option<PathBuf>,

    /// Largest accepted message in bytes.
    #[arg(long, env = "LINUXKEY_MAX_BYTES")]
    max_bytes: Option<usize>,

    /// Pause after each press and each release report, in milliseconds.
    #[arg(long, env = "LINUXKEY_HOLD_MS")]
    hold_ms: Option<u64>,

    /// Log received text instead of writing to the HID device.
    #[arg(long, env = "LINUXKEY_EMULATE")]
    emulate: bool,
}

impl Cli {
    /// Applies the command-line values on top of `base`.
    ///
    /// `--port` wins over the positional port when both are given.
    fn apply_to(self, mut base: ReceiverConfig) -> ReceiverConfig {
        if let Some(port) = self.port.or(self.port_arg) {
            base.port = port;
        }
        if let Some(bind) = self.bind {
            base.bind_address = bind;
        }
        if let Some(path) = self.hid_path {
            base.device_path = path;
        }
        if let Some(max) = self.max_bytes {
            base.max_payload_bytes = max;
        }
        if let Some(hold) = self.hold_ms {
            base.key_hold_ms = hold;
        }
        if self.emulate {
            base.simulate = true;
        }
        base
    }

    /// Loads the config file (if any) and overlays the CLI values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// merged settings fail validation.
    fn into_config(self) -> anyhow::Result<ReceiverConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ReceiverConfig::default(),
        };
        let config = self.apply_to(base);
        config.validate().context("invalid receiver configuration")?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments and the optional config file are merged into a
///    [`ReceiverConfig`].
/// 2. Logging is initialised.  `RUST_LOG` takes precedence over the
///    configured `log_level`.
/// 3. The report sink is opened.  A gadget device that cannot be opened
///    stops the process here with a non-zero exit code.
/// 4. The listener is bound, a Ctrl+C handler is installed, and the accept
///    loop runs until the handler clears the shutdown flag.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let sink = open_sink(&config).with_context(|| {
        format!(
            "cannot open HID device {} (is the USB gadget configured? use --emulate to test without one)",
            config.device_path.display()
        )
    })?;
    let dispatcher = TextDispatcher::new(KeystrokeEmitter::with_hold(sink, config.key_hold()));

    let server = ReceiverServer::bind(config, dispatcher)
        .await
        .context("failed to start receiver")?;

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down after the current session");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    server.run(running).await;

    info!("LinuxKey receiver stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn test_cli_without_arguments_keeps_defaults() {
        // Arrange
        let cli = Cli::parse_from(["linuxkey-receiver"]);

        // Act
        let config = cli.apply_to(ReceiverConfig::default());

        // Assert
        assert_eq!(config, ReceiverConfig::default());
    }

    #[test]
    fn test_positional_port_is_accepted() {
        let cli = Cli::parse_from(["linuxkey-receiver", "6000"]);
        assert_eq!(cli.apply_to(ReceiverConfig::default()).port, 6000);
    }

    #[test]
    fn test_port_flag_wins_over_positional_port() {
        let cli = Cli::parse_from(["linuxkey-receiver", "6000", "--port", "7000"]);
        assert_eq!(cli.apply_to(ReceiverConfig::default()).port, 7000);
    }

    #[test]
    fn test_equals_style_flags_are_parsed() {
        // Arrange
        let cli = Cli::parse_from([
            "linuxkey-receiver",
            "--hid-path=/dev/hidg1",
            "--max-bytes=1024",
            "--emulate",
        ]);

        // Act
        let config = cli.apply_to(ReceiverConfig::default());

        // Assert
        assert_eq!(config.device_path, PathBuf::from("/dev/hidg1"));
        assert_eq!(config.max_payload_bytes, 1024);
        assert!(config.simulate);
    }

    #[test]
    fn test_cli_values_override_file_values() {
        // Arrange: a file-level config with non-default values.
        let file = ReceiverConfig {
            port: 6000,
            key_hold_ms: 20,
            simulate: true,
            ..Default::default()
        };
        let cli = Cli::parse_from(["linuxkey-receiver", "--port", "7000", "--hold-ms", "1"]);

        // Act
        let config = cli.apply_to(file);

        // Assert: CLI wins where given; file values stay otherwise.
        assert_eq!(config.port, 7000);
        assert_eq!(config.key_hold(), Duration::from_millis(1));
        assert!(config.simulate);
    }

    #[test]
    fn test_hold_ms_flag_sets_key_hold() {
        let cli = Cli::parse_from(["linuxkey-receiver", "--hold-ms=12"]);
        assert_eq!(
            cli.apply_to(ReceiverConfig::default()).key_hold(),
            Duration::from_millis(12)
        );
    }

    #[test]
    fn test_hold_ms_reads_environment_fallback() {
        let command = Cli::command();
        let hold = command
            .get_arguments()
            .find(|arg| arg.get_id() == "hold_ms")
            .unwrap();
        assert_eq!(hold.get_env(), Some(std::ffi::OsStr::new("LINUXKEY_HOLD_MS")));
    }

    #[test]
    fn test_bind_flag_parses_ip_address() {
        let cli = Cli::parse_from(["linuxkey-receiver", "--bind", "127.0.0.1"]);
        let config = cli.apply_to(ReceiverConfig::default());
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_bind_address_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["linuxkey-receiver", "--bind", "not.an.ip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_max_bytes_fails_validation() {
        let cli = Cli::parse_from(["linuxkey-receiver", "--max-bytes", "0"]);
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_config_file_is_loaded_before_cli_overlay() {
        // Arrange
        let path = std::env::temp_dir().join(format!(
            "linuxkey-receiver-cli-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "port = 6100\nmax_payload_bytes = 512\n").unwrap();
        let cli = Cli::parse_from([
            "linuxkey-receiver".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "--max-bytes".to_string(),
            "2048".to_string(),
        ]);

        // Act
        let config = cli.into_config();
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        // Assert
        assert_eq!(config.port, 6100);
        assert_eq!(config.max_payload_bytes, 2048);
    }
}
