//! Linux USB HID gadget sink.
//!
//! Writes reports to the character device created by the kernel's `f_hid`
//! gadget function (normally `/dev/hidg0`).  Creating the gadget through
//! configfs is done outside this program; the node must already exist.
//!
//! # Why one `write` per report?
//!
//! `f_hid` treats every `write(2)` as one interrupt-IN transfer.  A report
//! split across two writes would reach the host as two malformed reports, so
//! a partial write is reported as [`SinkError::ShortWrite`] instead of being
//! completed with `write_all`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use linuxkey_core::{KeyboardReport, REPORT_LEN};
use tracing::debug;

use crate::application::emit_keystroke::{ReportSink, SinkError};

/// Unbuffered writer for a `/dev/hidgN` node.
#[derive(Debug)]
pub struct GadgetSink {
    file: File,
}

impl GadgetSink {
    /// Opens the gadget device for writing.
    ///
    /// The node is never created; a missing node means the gadget is not
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] with the path if the node cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "opened HID gadget");
        Ok(Self { file })
    }
}

impl ReportSink for GadgetSink {
    fn write_report(&mut self, report: &KeyboardReport) -> Result<(), SinkError> {
        let written = self.file.write(report.as_bytes())?;
        if written != REPORT_LEN {
            return Err(SinkError::ShortWrite {
                written,
                expected: REPORT_LEN,
            });
        }
        self.file.flush()?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
