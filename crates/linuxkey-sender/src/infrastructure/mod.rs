//! Infrastructure layer for linuxkey-sender.
//!
//! - [`client`] opens one TCP connection to the receiver per message.
//! - [`web_relay`] serves the HTML form and forwards submissions through
//!   [`client::send_once`].

pub mod client;
pub mod web_relay;

pub use client::{send_once, SendError};
pub use web_relay::{RelayError, WebRelay};
