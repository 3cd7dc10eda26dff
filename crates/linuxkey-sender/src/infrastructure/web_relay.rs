//! Web relay: a minimal HTTP/1.1 server for the sender form.
//!
//! Only what a browser needs to use one form is implemented:
//!
//! | Request          | Response                                   |
//! |------------------|--------------------------------------------|
//! | `GET /`          | the form page                              |
//! | `POST /`         | submission handled, form page with status  |
//! | `GET /healthz`   | `200 OK`, plain text                       |
//! | anything else    | `404 Not Found`                            |
//!
//! Every response is sent with `Connection: close`; there is no keep-alive,
//! chunked encoding, or pipelining.  Request bodies larger than
//! [`MAX_BODY_BYTES`] are refused with `413` before they are read.
//!
//! Each connection runs in its own Tokio task, and the accept loop polls the
//! shared `running` flag every 200 ms like the receiver does.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::application::{
    failed_status, render_page, review_submission, sent_status, Submission, EMPTY_TEXT_STATUS,
};
use crate::domain::{parse_urlencoded, RelayConfig};
use crate::infrastructure::client::send_once;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Largest accepted request line plus headers.
pub const MAX_HEAD_BYTES: usize = 16 * 1024;

/// How long a client gets to deliver its whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Errors raised by the web relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to bind web relay on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed before the request was complete")]
    Incomplete,

    #[error("malformed request: {0}")]
    Malformed(&'static str),

    #[error("request head exceeds {} bytes", MAX_HEAD_BYTES)]
    HeadTooLarge,

    #[error("request body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },

    #[error("request not received within {0:?}")]
    Timeout(Duration),
}

/// A parsed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    /// Request target with any query string removed.
    pub path: String,
    pub body: Vec<u8>,
}

/// An HTTP response ready to be serialised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }

    /// Serialises status line, headers and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len()
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    }
}

/// Reads one request: head up to the blank line, then `Content-Length` bytes
/// of body.
///
/// # Errors
///
/// Returns [`RelayError::BodyTooLarge`] as soon as the declared length is
/// known to exceed [`MAX_BODY_BYTES`], without reading the body.
pub async fn read_request<R>(reader: &mut R) -> Result<HttpRequest, RelayError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(RelayError::HeadTooLarge);
        }
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(RelayError::Incomplete);
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..head_end])
        .map_err(|_| RelayError::Malformed("request head is not UTF-8"))?;
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let (Some(method), Some(target)) = (request_line.next(), request_line.next()) else {
        return Err(RelayError::Malformed("bad request line"));
    };

    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| RelayError::Malformed("bad Content-Length"))?;
        }
    }
    if content_length > MAX_BODY_BYTES {
        return Err(RelayError::BodyTooLarge {
            length: content_length,
            limit: MAX_BODY_BYTES,
        });
    }

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(RelayError::Incomplete);
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    let path = target.split('?').next().unwrap_or(target).to_string();
    Ok(HttpRequest {
        method: method.to_string(),
        path,
        body,
    })
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Produces the response for one request, forwarding submissions to the
/// receiver.
pub async fn route(request: &HttpRequest, config: &RelayConfig) -> HttpResponse {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/healthz") => HttpResponse::text(200, "OK"),
        ("GET", "/") => HttpResponse::html(render_page(config, None, "")),
        ("POST", "/") => submit(request, config).await,
        _ => HttpResponse::text(404, "Not Found"),
    }
}

async fn submit(request: &HttpRequest, config: &RelayConfig) -> HttpResponse {
    let body = String::from_utf8_lossy(&request.body);
    let form = parse_urlencoded(&body);

    match review_submission(config, &form) {
        Submission::Unauthorized => HttpResponse::text(401, "Unauthorized"),
        Submission::Empty => HttpResponse::html(render_page(config, Some(EMPTY_TEXT_STATUS), "")),
        Submission::Forward(text) => match send_once(&config.target, &text).await {
            Ok(bytes) => HttpResponse::html(render_page(config, Some(&sent_status(bytes)), "")),
            Err(e) => {
                warn!("relay to {} failed: {e}", config.target);
                HttpResponse::html(render_page(config, Some(&failed_status(&e)), &text))
            }
        },
    }
}

/// The HTTP form server.
pub struct WebRelay {
    listener: TcpListener,
    config: Arc<RelayConfig>,
}

impl WebRelay {
    /// Binds the relay on `config.listen_addr`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Bind`] if the port cannot be bound.
    pub async fn bind(config: RelayConfig) -> Result<Self, RelayError> {
        let addr = config.listen_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RelayError::Bind { addr, source })?;
        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts browser connections until `running` is cleared.
    pub async fn run(self, running: Arc<AtomicBool>) {
        info!(
            "web relay listening on {}, forwarding to {}",
            self.local_addr()
                .map_or_else(|_| self.config.listen_addr.to_string(), |a| a.to_string()),
            self.config.target
        );

        while running.load(Ordering::Relaxed) {
            match timeout(ACCEPT_POLL_INTERVAL, self.listener.accept()).await {
                Ok(Ok((stream, peer))) => {
                    let config = Arc::clone(&self.config);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &config).await {
                            debug!("connection {peer} ended with error: {e}");
                        }
                    });
                }
                Ok(Err(e)) => error!("accept error: {e}"),
                Err(_) => {}
            }
        }

        info!("shutdown flag set; stopping web relay");
    }
}

async fn handle_connection(mut stream: TcpStream, config: &RelayConfig) -> Result<(), RelayError> {
    let response = match timeout(REQUEST_TIMEOUT, read_request(&mut stream)).await {
        Err(_) => return Err(RelayError::Timeout(REQUEST_TIMEOUT)),
        Ok(Ok(request)) => {
            debug!("{} {}", request.method, request.path);
            route(&request, config).await
        }
        Ok(Err(e @ RelayError::BodyTooLarge { .. })) => {
            warn!("{e}");
            HttpResponse::text(413, "Payload Too Large")
        }
        Ok(Err(e @ (RelayError::Malformed(_) | RelayError::HeadTooLarge))) => {
            warn!("{e}");
            HttpResponse::text(400, "Bad Request")
        }
        Ok(Err(e)) => return Err(e),
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
