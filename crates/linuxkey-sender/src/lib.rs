//! linuxkey-sender library crate.
//!
//! Delivers text to a LinuxKey receiver.  Two front ends share this library:
//!
//! - `linuxkey-sender send <ip> <port> <text>` pushes one message and exits.
//! - `linuxkey-sender serve <ip> <port>` runs a small HTML form on a local
//!   port and relays every submission to the receiver.
//!
//! # Architecture
//!
//! ```text
//! Browser form (HTTP/1.1, urlencoded POST)
//!         ↕
//! [linuxkey-sender]
//!   ├── domain/           RelayConfig, form decoding
//!   ├── application/      Submission rules, page rendering
//!   └── infrastructure/
//!         ├── client/     One-shot TCP send to the receiver
//!         └── web_relay/  Minimal HTTP accept loop
//!         ↕
//! linuxkey-receiver  (raw UTF-8 over TCP)
//! ```

/// Domain layer: relay settings and form decoding (no I/O).
pub mod domain;

/// Application layer: what a form submission should do.
pub mod application;

/// Infrastructure layer: TCP client and HTTP relay server.
pub mod infrastructure;
