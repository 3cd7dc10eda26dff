//! LinuxKey sender entry point.
//!
//! # Usage
//!
//! ```text
//! linuxkey-sender send  <RECEIVER> <PORT> <TEXT>
//! linuxkey-sender serve <RECEIVER> <PORT> [--host 127.0.0.1] [--web-port 8080] [--token T]
//! ```
//!
//! `RECEIVER` is an IP address or a host name such as `raspberrypi.local`.
//! `send` delivers one message to `RECEIVER:PORT` and exits.
//! `serve` starts the web relay: open `http://HOST:WEB_PORT/` in a browser,
//! paste text, and every submission is forwarded to `RECEIVER:PORT`.
//!
//! # Environment variable overrides (`serve` only)
//!
//! | Variable            | Default     | Description                      |
//! |---------------------|-------------|----------------------------------|
//! | `LINUXKEY_WEB_HOST` | `127.0.0.1` | Address the form is served on    |
//! | `LINUXKEY_WEB_PORT` | `8080`      | Port the form is served on       |
//! | `LINUXKEY_TOKEN`    | *(none)*    | Token required with every submit |

use std::net::{IpAddr, SocketAddr};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linuxkey_sender::domain::{ReceiverTarget, RelayConfig};
use linuxkey_sender::infrastructure::{send_once, WebRelay};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// LinuxKey sender.
#[derive(Debug, Parser)]
#[command(
    name = "linuxkey-sender",
    about = "Sends text to a LinuxKey receiver",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one message and exit.
    #[command(alias = "cli")]
    Send {
        /// Receiver IP address or host name.
        receiver: String,
        /// Receiver TCP port.
        port: u16,
        /// Text to type on the receiver's host.
        text: String,
    },

    /// Serve a web form that forwards submissions to the receiver.
    Serve {
        /// Receiver IP address or host name.
        receiver: String,
        /// Receiver TCP port.
        port: u16,
        /// Address to serve the form on.
        #[arg(long, default_value = "127.0.0.1", env = "LINUXKEY_WEB_HOST")]
        host: IpAddr,
        /// Port to serve the form on.
        #[arg(long, default_value_t = 8080, env = "LINUXKEY_WEB_PORT")]
        web_port: u16,
        /// Token every submission must include.
        #[arg(long, env = "LINUXKEY_TOKEN")]
        token: Option<String>,
    },
}

impl Command {
    /// Builds the relay settings for `serve`; `None` for `send`.
    fn relay_config(&self) -> Option<RelayConfig> {
        match self {
            Command::Serve {
                receiver,
                port,
                host,
                web_port,
                token,
            } => Some(RelayConfig {
                listen_addr: SocketAddr::new(*host, *web_port),
                target: ReceiverTarget::new(receiver.as_str(), *port),
                token: token.clone(),
            }),
            Command::Send { .. } => None,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(config) = cli.command.relay_config() {
        let relay = WebRelay::bind(config)
            .await
            .context("failed to start web relay")?;

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("received Ctrl+C, shutting down");
                    running_clone.store(false, Ordering::Relaxed);
                }
                Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
            }
        });

        relay.run(running).await;
        return Ok(());
    }

    if let Command::Send {
        receiver,
        port,
        text,
    } = cli.command
    {
        let target = ReceiverTarget::new(receiver, port);
        send_once(&target, &text)
            .await
            .with_context(|| format!("failed to send to {target}"))?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_subcommand_parses_positional_args() {
        // Arrange / Act
        let cli = Cli::parse_from(["linuxkey-sender", "send", "192.168.7.2", "5000", "hi there"]);

        // Assert
        match cli.command {
            Command::Send {
                receiver,
                port,
                text,
            } => {
                assert_eq!(receiver, "192.168.7.2");
                assert_eq!(port, 5000);
                assert_eq!(text, "hi there");
            }
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_alias_maps_to_send() {
        let cli = Cli::parse_from(["linuxkey-sender", "cli", "10.0.0.1", "5000", "x"]);
        assert!(matches!(cli.command, Command::Send { .. }));
        assert!(cli.command.relay_config().is_none());
    }

    #[test]
    fn test_serve_defaults_to_loopback_8080_without_token() {
        // Arrange
        let cli = Cli::parse_from(["linuxkey-sender", "serve", "192.168.7.2", "5000"]);

        // Act
        let cfg = cli.command.relay_config().unwrap();

        // Assert
        assert_eq!(cfg.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.target.to_string(), "192.168.7.2:5000");
        assert_eq!(cfg.token, None);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from([
            "linuxkey-sender",
            "serve",
            "10.0.0.2",
            "6000",
            "--host",
            "0.0.0.0",
            "--web-port",
            "9090",
            "--token",
            "s3cret",
        ]);

        let cfg = cli.command.relay_config().unwrap();

        assert_eq!(cfg.listen_addr.to_string(), "0.0.0.0:9090");
        assert_eq!(cfg.target.port, 6000);
        assert_eq!(cfg.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_send_requires_text() {
        let result = Cli::try_parse_from(["linuxkey-sender", "send", "10.0.0.1", "5000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_send_accepts_host_name() {
        let cli = Cli::parse_from(["linuxkey-sender", "send", "localhost", "5000", "x"]);
        match cli.command {
            Command::Send { receiver, .. } => assert_eq!(receiver, "localhost"),
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn test_serve_keeps_host_name_target_as_given() {
        let cli = Cli::parse_from(["linuxkey-sender", "serve", "raspberrypi.local", "5000"]);

        let cfg = cli.command.relay_config().unwrap();

        assert_eq!(cfg.target, ReceiverTarget::new("raspberrypi.local", 5000));
        assert_eq!(cfg.target.to_string(), "raspberrypi.local:5000");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Cli::try_parse_from(["linuxkey-sender", "send", "localhost", "99999", "x"]);
        assert!(result.is_err());
    }
}
