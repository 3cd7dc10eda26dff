//! Domain layer for linuxkey-sender.
//!
//! Pure types with no networking: the relay configuration and the
//! `application/x-www-form-urlencoded` decoder used for form posts.

pub mod config;
pub mod form;

pub use config::{ReceiverTarget, RelayConfig};
pub use form::{parse_urlencoded, FormFields};
