//! Recording report sink for unit and integration tests.
//!
//! # Why a mock sink?
//!
//! The real gadget sink needs a configured USB device controller, and what it
//! writes can only be observed from the host on the other end of the cable.
//! `RecordingSink` keeps every report in memory instead so tests can assert
//! exactly what would have reached the host and in what order.
//!
//! Clones share the same record, so a test keeps one clone and hands the other
//! to the emitter:
//!
//! ```ignore
//! let sink = RecordingSink::new();
//! let emitter = KeystrokeEmitter::with_hold(Box::new(sink.clone()), Duration::ZERO);
//! // ... dispatch ...
//! assert_eq!(sink.reports().len(), 2);
//! ```
//!
//! # `failing_after`
//!
//! [`RecordingSink::failing_after`] accepts that many reports and then fails
//! every further write, to exercise device-failure paths.

use std::sync::{Arc, Mutex, PoisonError};

use linuxkey_core::KeyboardReport;

use crate::application::emit_keystroke::{ReportSink, SinkError};

/// A sink that records reports without touching any device.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<KeyboardReport>>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    /// Creates a sink that accepts every report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that accepts `limit` reports, then fails.
    pub fn failing_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            ..Self::default()
        }
    }

    /// Snapshot of every report recorded so far.
    pub fn reports(&self) -> Vec<KeyboardReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReportSink for RecordingSink {
    fn write_report(&mut self, report: &KeyboardReport) -> Result<(), SinkError> {
        let mut reports = self.reports.lock().unwrap_or_else(PoisonError::into_inner);
        if self.fail_after.is_some_and(|limit| reports.len() >= limit) {
            return Err(SinkError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock failure",
            )));
        }
        reports.push(*report);
        Ok(())
    }
}
