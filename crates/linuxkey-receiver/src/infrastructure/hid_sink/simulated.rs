//! No-op sink used with `--emulate`.
//!
//! Lets the whole receive/decode/dispatch path run on a machine without a
//! gadget device.  Nothing is written anywhere and no call ever fails.

use linuxkey_core::KeyboardReport;
use tracing::trace;

use crate::application::emit_keystroke::{ReportSink, SinkError};

#[derive(Debug, Default)]
pub struct SimulatedSink {
    reports: u64,
}

impl SimulatedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports swallowed so far.
    pub fn report_count(&self) -> u64 {
        self.reports
    }
}

impl ReportSink for SimulatedSink {
    fn write_report(&mut self, report: &KeyboardReport) -> Result<(), SinkError> {
        self.reports += 1;
        trace!(bytes = ?report.as_bytes(), "simulated report");
        Ok(())
    }
}
