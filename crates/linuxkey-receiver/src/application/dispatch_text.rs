//! TextDispatcher: types a decoded message one character at a time.

use linuxkey_core::resolve;
use thiserror::Error;
use tracing::warn;

use super::emit_keystroke::{KeystrokeEmitter, SinkError};

/// A device write failed part-way through a message.
#[derive(Debug, Error)]
#[error("device write failed after {emitted} key stroke(s): {source}")]
pub struct DispatchError {
    /// Characters fully typed before the failure.
    pub emitted: usize,
    #[source]
    pub source: SinkError,
}

/// What happened to one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Characters typed, each as one press/release pair.
    pub emitted: usize,
    /// Characters with no key mapping, in input order.
    pub skipped: Vec<char>,
}

/// Dispatches text to a [`KeystrokeEmitter`].
pub struct TextDispatcher {
    emitter: KeystrokeEmitter,
}

impl TextDispatcher {
    pub fn new(emitter: KeystrokeEmitter) -> Self {
        Self { emitter }
    }

    /// Types `text` in order, one key stroke per supported character.
    ///
    /// Unsupported characters are logged with their code point and skipped;
    /// they never stop the rest of the message.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] on the first device write failure.  The
    /// remaining characters of this message are not typed.
    pub async fn dispatch(&mut self, text: &str) -> Result<DispatchSummary, DispatchError> {
        let mut summary = DispatchSummary::default();
        for ch in text.chars() {
            let Some(mapping) = resolve(ch) else {
                warn!("skipping unsupported char {ch:?} (U+{:04X})", u32::from(ch));
                summary.skipped.push(ch);
                continue;
            };
            self.emitter
                .emit(mapping)
                .await
                .map_err(|source| DispatchError {
                    emitted: summary.emitted,
                    source,
                })?;
            summary.emitted += 1;
        }
        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
