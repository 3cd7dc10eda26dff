//! Report sink implementations.
//!
//! Exactly one sink is chosen at startup by [`open_sink`] and owned by the
//! emitter for the lifetime of the process.

pub mod gadget;
pub mod mock;
pub mod simulated;

use crate::application::emit_keystroke::{ReportSink, SinkError};
use crate::infrastructure::config::ReceiverConfig;

pub use gadget::GadgetSink;
pub use simulated::SimulatedSink;

/// Opens the sink selected by `config`.
///
/// # Errors
///
/// Returns [`SinkError::Open`] if the gadget device cannot be opened.  The
/// simulated sink never fails.
pub fn open_sink(config: &ReceiverConfig) -> Result<Box<dyn ReportSink>, SinkError> {
    if config.simulate {
        Ok(Box::new(SimulatedSink::new()))
    } else {
        Ok(Box::new(GadgetSink::open(&config.device_path)?))
    }
}
