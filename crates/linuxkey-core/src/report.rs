//! The 8-byte boot-protocol keyboard input report.
//!
//! ```text
//! byte 0   modifier bitmask (see ModifierFlags)
//! byte 1   reserved, always 0
//! byte 2   keycode of the single pressed key
//! byte 3-7 further simultaneous keys, always 0 (no chords)
//! ```
//!
//! A key stroke is a press report followed by [`KeyboardReport::RELEASE`],
//! which tells the host that nothing is held any more.

use crate::keymap::KeyMapping;

/// Size in bytes of every report written to the gadget device.
pub const REPORT_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyboardReport([u8; REPORT_LEN]);

impl KeyboardReport {
    /// The all-zero report: no modifier, no key.
    pub const RELEASE: KeyboardReport = KeyboardReport([0; REPORT_LEN]);

    /// Builds the report that holds down `mapping`.
    pub fn press(mapping: KeyMapping) -> Self {
        let mut bytes = [0; REPORT_LEN];
        bytes[0] = mapping.modifier.bits();
        bytes[2] = mapping.keycode.as_u8();
        KeyboardReport(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; REPORT_LEN] {
        &self.0
    }

    /// Raw keycode byte; 0 means no key.
    pub fn keycode(&self) -> u8 {
        self.0[2]
    }

    pub fn is_release(&self) -> bool {
        *self == Self::RELEASE
    }
}

impl From<[u8; REPORT_LEN]> for KeyboardReport {
    fn from(bytes: [u8; REPORT_LEN]) -> Self {
        KeyboardReport(bytes)
    }
}

impl AsRef<[u8]> for KeyboardReport {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
