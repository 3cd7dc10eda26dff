//! Network infrastructure for the receiver.
//!
//! The wire protocol has no framing: a sender connects, writes UTF-8 bytes,
//! and closes (or half-closes) the connection to mark the end of the message.
//! Nothing is ever written back.
//!
//! Architecture:
//! - [`ReceiverServer`] owns the listening socket and the [`TextDispatcher`].
//! - Connections are handled strictly one after another.  A session is read,
//!   decoded and typed to completion before the next `accept`, so key strokes
//!   from two senders can never interleave on the device.
//! - Every per-connection failure is a [`SessionError`] that is logged with
//!   the peer address; the loop then goes back to accepting.
//!
//! ```text
//! Listening ─accept─▶ Receiving ─EOF─▶ Decoded ─▶ Dispatching ─┐
//!     ▲                   │ timeout / too large    │ bad UTF-8  │
//!     └───────────────────┴────────────────────────┴────────────┘
//! ```

use std::net::SocketAddr;
use std::string::FromUtf8Error;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    net::{TcpListener, TcpSocket, TcpStream},
    time::timeout,
};
use tracing::{debug, error, info, warn};

use crate::application::dispatch_text::{DispatchError, DispatchSummary, TextDispatcher};
use crate::infrastructure::config::ReceiverConfig;

/// Bytes requested from the socket per read.
pub const CHUNK_SIZE: usize = 4096;

/// How long one `accept` waits before the loop re-checks the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Pending-connection queue length.  Senders beyond the first wait in the
/// kernel until the current session finishes.
const LISTEN_BACKLOG: u32 = 1;

/// Errors raised while setting up the listener.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single connection was abandoned.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The sender went quiet for longer than the idle timeout.
    #[error("connection timed out after {idle:?} idle ({received} bytes received)")]
    Timeout { received: usize, idle: Duration },
    /// The message grew past the configured limit.
    #[error("payload too large: {received} bytes exceeds limit of {limit}")]
    PayloadTooLarge { received: usize, limit: usize },
    /// The message was not valid UTF-8.
    #[error("invalid UTF-8 payload: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),
    /// The socket failed while reading.
    #[error("error receiving payload: {0}")]
    Io(#[from] std::io::Error),
    /// Writing to the HID device failed mid-message.
    #[error("HID handling error: {0}")]
    Device(#[from] DispatchError),
}

/// Result of one fully handled connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Raw payload size.
    pub bytes: usize,
    /// Decoded characters, supported or not.
    pub chars: usize,
    pub summary: DispatchSummary,
}

/// Reads until EOF, enforcing a size limit and a per-read idle timeout.
///
/// Reaching exactly `max_bytes` is allowed; the first read that would go past
/// it aborts with nothing kept.
///
/// # Errors
///
/// Returns [`SessionError::Timeout`], [`SessionError::PayloadTooLarge`] or
/// [`SessionError::Io`].
pub async fn receive_payload<R>(
    reader: &mut R,
    max_bytes: usize,
    idle: Duration,
) -> Result<Vec<u8>, SessionError>
where
    R: AsyncRead + Unpin,
{
    let mut payload = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match timeout(idle, reader.read(&mut chunk)).await {
            Ok(read) => read?,
            Err(_) => {
                return Err(SessionError::Timeout {
                    received: payload.len(),
                    idle,
                })
            }
        };
        if n == 0 {
            return Ok(payload);
        }
        let received = payload.len() + n;
        if received > max_bytes {
            return Err(SessionError::PayloadTooLarge {
                received,
                limit: max_bytes,
            });
        }
        payload.extend_from_slice(&chunk[..n]);
    }
}

/// Decodes a complete payload as strict UTF-8.
///
/// # Errors
///
/// Returns [`SessionError::InvalidEncoding`] on any malformed sequence,
/// including one truncated at the end of the payload.
pub fn decode_payload(payload: Vec<u8>) -> Result<String, SessionError> {
    Ok(String::from_utf8(payload)?)
}

/// The sequential TCP receiver.
pub struct ReceiverServer {
    listener: TcpListener,
    config: ReceiverConfig,
    dispatcher: TextDispatcher,
}

impl ReceiverServer {
    /// Binds the listening socket with `SO_REUSEADDR` so a restarted receiver
    /// can reclaim its port immediately.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::BindFailed`] if the address is in use or not
    /// available.
    pub async fn bind(
        config: ReceiverConfig,
        dispatcher: TextDispatcher,
    ) -> Result<Self, NetworkError> {
        let addr = config.listen_addr();
        let listener = listen(addr).map_err(|source| NetworkError::BindFailed { addr, source })?;
        Ok(Self {
            listener,
            config,
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `running` is cleared.
    ///
    /// The flag is checked between sessions only; a message that is already
    /// being typed always runs to completion.
    pub async fn run(mut self, running: Arc<AtomicBool>) {
        info!(
            "receiver listening on {} (emulate={}, hid={})",
            self.local_addr()
                .map_or_else(|_| self.config.listen_addr().to_string(), |a| a.to_string()),
            self.config.simulate,
            self.config.device_path.display()
        );

        while running.load(Ordering::Relaxed) {
            match timeout(ACCEPT_POLL_INTERVAL, self.listener.accept()).await {
                Ok(Ok((stream, peer))) => {
                    let _ = self.handle_connection(stream, peer).await;
                }
                Ok(Err(e)) => error!("accept error: {e}"),
                Err(_) => {}
            }
        }

        info!("shutdown flag set; stopping accept loop");
    }

    /// Accepts and fully handles exactly one connection.
    ///
    /// # Errors
    ///
    /// Returns the `accept` error, if any.  Session failures are returned in
    /// the inner `Result` after being logged.
    pub async fn serve_one(
        &mut self,
    ) -> std::io::Result<(SocketAddr, Result<SessionOutcome, SessionError>)> {
        let (stream, peer) = self.listener.accept().await?;
        let result = self.handle_connection(stream, peer).await;
        Ok((peer, result))
    }

    async fn handle_connection(
        &mut self,
        stream: TcpStream,
        peer: SocketAddr,
    ) -> Result<SessionOutcome, SessionError> {
        info!("client connected: {peer}");
        let result = self.run_session(stream, peer).await;
        match &result {
            Ok(outcome) => info!(
                "session {peer} done: {} key stroke(s), {} skipped",
                outcome.summary.emitted,
                outcome.summary.skipped.len()
            ),
            Err(e @ SessionError::Device(_)) => error!("session {peer} failed: {e}"),
            Err(e) => warn!("session {peer} failed: {e}"),
        }
        result
    }

    async fn run_session(
        &mut self,
        mut stream: TcpStream,
        peer: SocketAddr,
    ) -> Result<SessionOutcome, SessionError> {
        let payload = receive_payload(
            &mut stream,
            self.config.max_payload_bytes,
            self.config.receive_timeout(),
        )
        .await?;
        drop(stream);

        let bytes = payload.len();
        debug!("received {bytes} bytes from {peer}");
        let text = decode_payload(payload)?;
        let chars = text.chars().count();
        info!("received {chars} characters");
        if self.config.simulate {
            info!("[EMULATED OUTPUT]\n{text}");
        }

        let summary = self.dispatcher.dispatch(&text).await?;
        Ok(SessionOutcome {
            bytes,
            chars,
            summary,
        })
    }
}

fn listen(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(LISTEN_BACKLOG)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
