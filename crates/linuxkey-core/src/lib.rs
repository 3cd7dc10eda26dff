//! # linuxkey-core
//!
//! Shared library for LinuxKey containing the character-to-keystroke table and
//! the raw USB HID keyboard report layout.
//!
//! This crate has no dependencies on device nodes, sockets, or async runtimes.
//! Both the receiver (which writes reports to `/dev/hidgN`) and tooling such as
//! benches and tests build on it.
//!
//! # Architecture overview (for beginners)
//!
//! LinuxKey relays typed text from a sender to a small Linux board that
//! presents itself to a host computer as a USB keyboard (a "HID gadget").
//! The host cannot receive text directly; it only understands the 8-byte
//! reports a physical keyboard sends.  This crate defines:
//!
//! - **`keymap`** – Which physical key (HID Usage ID) and which modifier bits
//!   produce a given character on a US keyboard layout.
//!
//! - **`report`** – The fixed 8-byte boot-protocol keyboard report that carries
//!   one key press (or the all-zero release) to the host.

pub mod keymap;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `linuxkey_core::resolve` instead of `linuxkey_core::keymap::resolve`.
pub use keymap::hid::{HidKeyCode, ModifierFlags};
pub use keymap::{resolve, KeyMapping};
pub use report::{KeyboardReport, REPORT_LEN};
