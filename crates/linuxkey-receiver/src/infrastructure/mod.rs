//! Infrastructure layer for the receiver.
//!
//! Contains the OS-facing adapters: the HID gadget device, the TCP listener,
//! and the configuration file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `linuxkey_core`, but MUST NOT be imported by the `application` layer
//! (test code excepted).
//!
//! # Sub-modules
//!
//! - **`hid_sink`** – [`ReportSink`](crate::application::emit_keystroke::ReportSink)
//!   implementations: the real `/dev/hidgN` writer, a no-op sink for
//!   `--emulate`, and a recording mock for tests.
//!
//! - **`network`** – The sequential accept loop that receives one message per
//!   connection and hands it to the text dispatcher.
//!
//! - **`config`** – TOML configuration with defaults for every setting.

pub mod config;
pub mod hid_sink;
pub mod network;
