//! One-shot TCP client for the receiver.
//!
//! The receiver's protocol has no framing: the end of a message is the end of
//! the stream.  [`send_once`] therefore writes the whole payload and then
//! shuts down its write half so the receiver sees EOF and starts typing.

use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::info;

use crate::domain::ReceiverTarget;

/// How long to wait for the receiver to accept the connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from [`send_once`].
#[derive(Debug, Error)]
pub enum SendError {
    /// Name resolution or the TCP connect failed.
    #[error("could not connect to {target}: {source}")]
    Connect {
        target: ReceiverTarget,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {target} after {timeout:?}")]
    ConnectTimeout {
        target: ReceiverTarget,
        timeout: Duration,
    },

    #[error("failed sending to {target}: {source}")]
    Write {
        target: ReceiverTarget,
        #[source]
        source: std::io::Error,
    },
}

/// Sends `text` as UTF-8 to the receiver at `target` and closes the
/// connection.
///
/// The host is resolved at connect time and every resolved address is tried
/// in turn.  Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`SendError`] if the host does not resolve, the connection cannot
/// be opened in time, or the write fails.
///
/// # Example
///
/// ```no_run
/// use linuxkey_sender::domain::ReceiverTarget;
/// use linuxkey_sender::infrastructure::send_once;
///
/// # async fn example() -> Result<(), linuxkey_sender::infrastructure::SendError> {
/// let target = ReceiverTarget::new("raspberrypi.local", 5000);
/// let sent = send_once(&target, "hello\n").await?;
/// assert_eq!(sent, 6);
/// # Ok(())
/// # }
/// ```
pub async fn send_once(target: &ReceiverTarget, text: &str) -> Result<usize, SendError> {
    let connect = TcpStream::connect((target.host.as_str(), target.port));
    let mut stream = timeout(CONNECT_TIMEOUT, connect)
        .await
        .map_err(|_| SendError::ConnectTimeout {
            target: target.clone(),
            timeout: CONNECT_TIMEOUT,
        })?
        .map_err(|source| SendError::Connect {
            target: target.clone(),
            source,
        })?;

    let payload = text.as_bytes();
    let write_failed = |source| SendError::Write {
        target: target.clone(),
        source,
    };
    stream.write_all(payload).await.map_err(write_failed)?;
    stream.shutdown().await.map_err(write_failed)?;

    info!("sent {} bytes to {target}", payload.len());
    Ok(payload.len())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
