//! linuxkey-receiver library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the receiver do? (for beginners)
//!
//! The receiver runs on a small Linux board (e.g. a Raspberry Pi Zero) whose
//! USB port is configured as a keyboard gadget.  It:
//!
//! 1. Listens on a TCP port and accepts one sender at a time.
//! 2. Reads the whole message (bounded in size and by an idle timeout).
//! 3. Decodes it as strict UTF-8.
//! 4. Looks up every character in the `linuxkey_core` table.
//! 5. Writes a press report and a release report per character to the
//!    gadget device, pausing briefly after each so the host registers a
//!    distinct key stroke.

/// Application layer: keystroke emission and text dispatch.
pub mod application;

/// Infrastructure layer: device sinks, TCP server, and configuration.
pub mod infrastructure;
