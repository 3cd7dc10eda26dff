//! Application layer use cases for the receiver.
//!
//! - **`emit_keystroke`** – Turns one resolved key press into a press report
//!   and a release report on a [`ReportSink`](emit_keystroke::ReportSink),
//!   with a fixed hold after each.
//!
//! - **`dispatch_text`** – Walks a decoded message character by character,
//!   resolves each one and hands hits to the emitter.  Misses are logged and
//!   skipped.

pub mod dispatch_text;
pub mod emit_keystroke;
