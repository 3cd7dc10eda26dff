//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page) and the boot-report
//! modifier byte.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07)
//! and Device Class Definition for HID 1.11, Appendix B.1 (boot keyboard report).
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  These numbers are called *Usage IDs*.  They name
//! **physical key positions**, not characters: the key labelled `1`/`!` has a
//! single usage (0x1E) and the host decides which character it produces from
//! the modifier byte sent alongside it.
//!
//! | Key          | HID Usage ID |
//! |--------------|-------------|
//! | Letter A     | 0x04        |
//! | Digit 1      | 0x1E        |
//! | Enter        | 0x28        |
//! | Space        | 0x2C        |
//!
//! Only the usages LinuxKey can type are listed here.  Usage 0x32
//! (Non-US `#`/`~`) is deliberately absent because it only exists on ISO
//! keyboards.

/// USB HID Usage ID for the keys LinuxKey can type (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID, which is exactly the
/// byte written into the keycode slot of a keyboard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Whitespace and punctuation (HID 0x28–0x38)
    Enter = 0x28,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
}

impl HidKeyCode {
    /// Returns the raw USB HID Usage ID for this key.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The modifier byte at offset 0 of a boot keyboard report.
///
/// Each bit is one physical modifier key held down while the keycode is
/// pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags(pub u8);

/// Bit 1 of the modifier byte.
const LEFT_SHIFT: u8 = 1 << 1;

impl ModifierFlags {
    /// No modifier held.
    pub const NONE: ModifierFlags = ModifierFlags(0);
    /// Left Shift held; the bit the US layout uses for shifted symbols.
    pub const SHIFT: ModifierFlags = ModifierFlags(LEFT_SHIFT);

    /// Returns these flags with Left Shift added.
    pub fn with_shift(self) -> Self {
        ModifierFlags(self.0 | LEFT_SHIFT)
    }

    /// Returns the raw report byte.
    pub fn bits(self) -> u8 {
        self.0
    }
}
