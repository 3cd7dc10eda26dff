//! KeystrokeEmitter: writes one key press as a press/release report pair.
//!
//! This use case sits at the application layer and delegates to a
//! [`ReportSink`] trait object for the actual device write.  The gadget
//! device, the simulated sink and the recording mock live in the
//! infrastructure layer.
//!
//! # Why hold after each report?
//!
//! The host polls the gadget's interrupt endpoint.  If press and release land
//! between two polls the host only ever sees the release and the key stroke
//! is lost, and two presses of the same key in a row would merge into one.
//! Holding for a few milliseconds after each report makes every stroke a
//! separate keydown/keyup pair on the host side.

use std::time::Duration;

use linuxkey_core::{KeyMapping, KeyboardReport};
use thiserror::Error;
use tracing::trace;

/// Default pause after each report.
pub const DEFAULT_KEY_HOLD: Duration = Duration::from_millis(5);

/// Error type for report sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The gadget device node could not be opened.
    #[error("failed to open HID device at {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing or flushing a report failed.
    #[error("HID write failed: {0}")]
    Write(#[from] std::io::Error),
    /// The device accepted only part of a report.
    #[error("short HID write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Destination for raw keyboard reports.
///
/// Implementations must push each report to the device before returning;
/// there is no later flush point.
pub trait ReportSink: Send {
    /// Writes a single 8-byte report.
    fn write_report(&mut self, report: &KeyboardReport) -> Result<(), SinkError>;
}

/// Emits key strokes on an exclusively owned sink.
pub struct KeystrokeEmitter {
    sink: Box<dyn ReportSink>,
    hold: Duration,
}

impl KeystrokeEmitter {
    /// Creates an emitter with the default 5 ms hold.
    pub fn new(sink: Box<dyn ReportSink>) -> Self {
        Self::with_hold(sink, DEFAULT_KEY_HOLD)
    }

    /// Creates an emitter with a custom hold interval.
    pub fn with_hold(sink: Box<dyn ReportSink>, hold: Duration) -> Self {
        Self { sink, hold }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Types one key stroke: press, hold, release, hold.
    ///
    /// A failed write is returned as-is and never retried; the release is not
    /// attempted if the press failed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if either report cannot be written.
    pub async fn emit(&mut self, mapping: KeyMapping) -> Result<(), SinkError> {
        trace!(
            modifier = mapping.modifier.bits(),
            keycode = mapping.keycode.as_u8(),
            "key stroke"
        );
        self.sink.write_report(&KeyboardReport::press(mapping))?;
        pause(self.hold).await;
        self.sink.write_report(&KeyboardReport::RELEASE)?;
        pause(self.hold).await;
        Ok(())
    }
}

/// Takes the hold by value so no borrow of the emitter lives across the
/// await; the sink is `Send` but not `Sync`.
async fn pause(hold: Duration) {
    if !hold.is_zero() {
        tokio::time::sleep(hold).await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
