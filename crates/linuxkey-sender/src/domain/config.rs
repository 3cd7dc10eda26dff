//! Web relay configuration.
//!
//! [`RelayConfig`] is built once in `main.rs` from the `serve` subcommand's
//! arguments and shared read-only by every HTTP connection task.

use std::fmt;
use std::net::SocketAddr;

/// Where the receiver listens: a host name or IP literal, plus a port.
///
/// The host is kept exactly as given and only resolved when connecting, so
/// names such as `raspberrypi.local` work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverTarget {
    pub host: String,
    pub port: u16,
}

impl ReceiverTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl From<SocketAddr> for ReceiverTarget {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }
}

impl fmt::Display for ReceiverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Runtime settings for the web relay.
///
/// # Example
///
/// ```rust
/// use linuxkey_sender::domain::RelayConfig;
///
/// let cfg = RelayConfig::default();
/// assert_eq!(cfg.listen_addr.port(), 8080);
/// assert!(!cfg.token_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Where the HTML form is served.  Loopback by default, so only a browser
    /// on the same machine can reach it.
    pub listen_addr: SocketAddr,

    /// The LinuxKey receiver that submissions are forwarded to.
    pub target: ReceiverTarget,

    /// Shared secret every submission must carry in its `token` field.
    /// `None` (or an empty string) disables the check.
    pub token: Option<String>,
}

impl RelayConfig {
    /// The token submissions must match, if one is configured.
    pub fn required_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn token_required(&self) -> bool {
        self.required_token().is_some()
    }
}

impl Default for RelayConfig {
    /// | Field       | Default          |
    /// |-------------|------------------|
    /// | listen_addr | `127.0.0.1:8080` |
    /// | target      | `127.0.0.1:5000` |
    /// | token       | none             |
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            target: ReceiverTarget::new("127.0.0.1", 5000),
            token: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listens_on_loopback_8080() {
        // Arrange / Act
        let cfg = RelayConfig::default();

        // Assert
        assert_eq!(cfg.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.target.port, 5000);
        assert_eq!(cfg.token, None);
    }

    #[test]
    fn test_empty_token_means_no_token() {
        let cfg = RelayConfig {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(!cfg.token_required());
        assert_eq!(cfg.required_token(), None);
    }

    #[test]
    fn test_configured_token_is_required() {
        let cfg = RelayConfig {
            token: Some("s3cret".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.required_token(), Some("s3cret"));
    }

    #[test]
    fn test_target_displays_host_as_given() {
        assert_eq!(
            ReceiverTarget::new("raspberrypi.local", 5000).to_string(),
            "raspberrypi.local:5000"
        );
    }

    #[test]
    fn test_target_from_ipv6_socket_addr_is_bracketed() {
        let target = ReceiverTarget::from("[::1]:6000".parse::<SocketAddr>().unwrap());
        assert_eq!(target.host, "::1");
        assert_eq!(target.to_string(), "[::1]:6000");
    }
}
