//! Character to keystroke translation for a US keyboard layout.
//!
//! The table below is a compatibility contract with the USB host: the host
//! turns (modifier, usage) back into a character using its own US layout, so
//! every entry must match what a physical US keyboard would send.
//!
//! Uppercase letters are not stored; [`resolve`] derives them from the
//! lowercase entry by adding Left Shift.

pub mod hid;

use hid::{HidKeyCode, ModifierFlags};

/// One key press: the modifier byte and the usage to hold down together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMapping {
    pub modifier: ModifierFlags,
    pub keycode: HidKeyCode,
}

impl KeyMapping {
    /// An unmodified key press.
    pub const fn plain(keycode: HidKeyCode) -> Self {
        Self {
            modifier: ModifierFlags::NONE,
            keycode,
        }
    }

    /// A key press with Left Shift held.
    pub const fn shifted(keycode: HidKeyCode) -> Self {
        Self {
            modifier: ModifierFlags::SHIFT,
            keycode,
        }
    }

    /// Returns this mapping with Left Shift added to its modifier.
    pub fn with_shift(self) -> Self {
        Self {
            modifier: self.modifier.with_shift(),
            keycode: self.keycode,
        }
    }
}

const fn n(keycode: HidKeyCode) -> KeyMapping {
    KeyMapping::plain(keycode)
}

const fn s(keycode: HidKeyCode) -> KeyMapping {
    KeyMapping::shifted(keycode)
}

/// Every character typed directly, in the order the entries were defined.
const TABLE_ENTRIES: &[(char, KeyMapping)] = &[
    ('a', n(HidKeyCode::KeyA)),
    ('b', n(HidKeyCode::KeyB)),
    ('c', n(HidKeyCode::KeyC)),
    ('d', n(HidKeyCode::KeyD)),
    ('e', n(HidKeyCode::KeyE)),
    ('f', n(HidKeyCode::KeyF)),
    ('g', n(HidKeyCode::KeyG)),
    ('h', n(HidKeyCode::KeyH)),
    ('i', n(HidKeyCode::KeyI)),
    ('j', n(HidKeyCode::KeyJ)),
    ('k', n(HidKeyCode::KeyK)),
    ('l', n(HidKeyCode::KeyL)),
    ('m', n(HidKeyCode::KeyM)),
    ('n', n(HidKeyCode::KeyN)),
    ('o', n(HidKeyCode::KeyO)),
    ('p', n(HidKeyCode::KeyP)),
    ('q', n(HidKeyCode::KeyQ)),
    ('r', n(HidKeyCode::KeyR)),
    ('s', n(HidKeyCode::KeyS)),
    ('t', n(HidKeyCode::KeyT)),
    ('u', n(HidKeyCode::KeyU)),
    ('v', n(HidKeyCode::KeyV)),
    ('w', n(HidKeyCode::KeyW)),
    ('x', n(HidKeyCode::KeyX)),
    ('y', n(HidKeyCode::KeyY)),
    ('z', n(HidKeyCode::KeyZ)),
    ('1', n(HidKeyCode::Digit1)),
    ('2', n(HidKeyCode::Digit2)),
    ('3', n(HidKeyCode::Digit3)),
    ('4', n(HidKeyCode::Digit4)),
    ('5', n(HidKeyCode::Digit5)),
    ('6', n(HidKeyCode::Digit6)),
    ('7', n(HidKeyCode::Digit7)),
    ('8', n(HidKeyCode::Digit8)),
    ('9', n(HidKeyCode::Digit9)),
    ('0', n(HidKeyCode::Digit0)),
    ('\n', n(HidKeyCode::Enter)),
    ('\t', n(HidKeyCode::Tab)),
    (' ', n(HidKeyCode::Space)),
    ('-', n(HidKeyCode::Minus)),
    ('=', n(HidKeyCode::Equal)),
    ('[', n(HidKeyCode::BracketLeft)),
    (']', n(HidKeyCode::BracketRight)),
    ('\\', n(HidKeyCode::Backslash)),
    (';', n(HidKeyCode::Semicolon)),
    ('\'', n(HidKeyCode::Quote)),
    ('`', n(HidKeyCode::Backquote)),
    (',', n(HidKeyCode::Comma)),
    ('.', n(HidKeyCode::Period)),
    ('/', n(HidKeyCode::Slash)),
    ('_', s(HidKeyCode::Minus)),
    ('+', s(HidKeyCode::Equal)),
    ('{', s(HidKeyCode::BracketLeft)),
    ('}', s(HidKeyCode::BracketRight)),
    ('|', s(HidKeyCode::Backslash)),
    (':', s(HidKeyCode::Semicolon)),
    ('"', s(HidKeyCode::Quote)),
    ('~', s(HidKeyCode::Backquote)),
    ('<', s(HidKeyCode::Comma)),
    ('>', s(HidKeyCode::Period)),
    ('?', s(HidKeyCode::Slash)),
    ('!', s(HidKeyCode::Digit1)),
    ('@', s(HidKeyCode::Digit2)),
    ('#', s(HidKeyCode::Digit3)),
    ('$', s(HidKeyCode::Digit4)),
    ('%', s(HidKeyCode::Digit5)),
    ('^', s(HidKeyCode::Digit6)),
    ('&', s(HidKeyCode::Digit7)),
    ('*', s(HidKeyCode::Digit8)),
    ('(', s(HidKeyCode::Digit9)),
    (')', s(HidKeyCode::Digit0)),
];

/// Direct-indexed view of [`TABLE_ENTRIES`] over the 7-bit ASCII range.
static ASCII_TABLE: [Option<KeyMapping>; 128] = build_ascii_table();

const fn build_ascii_table() -> [Option<KeyMapping>; 128] {
    let mut table = [None; 128];
    let mut i = 0;
    while i < TABLE_ENTRIES.len() {
        let (ch, mapping) = TABLE_ENTRIES[i];
        table[ch as usize] = Some(mapping);
        i += 1;
    }
    table
}

fn lookup(ch: char) -> Option<KeyMapping> {
    ASCII_TABLE.get(ch as usize).copied().flatten()
}

/// Resolves a character to the key press that types it on a US layout.
///
/// - `'\r'` is treated as `'\n'`, so both produce Enter.
/// - An uppercase ASCII letter resolves to its lowercase entry with Left Shift
///   added to whatever modifier that entry carries.
/// - Anything outside the table (non-ASCII, other control characters) returns
///   `None`; the caller decides what a miss means.
pub fn resolve(ch: char) -> Option<KeyMapping> {
    let ch = if ch == '\r' { '\n' } else { ch };
    if ch.is_ascii_uppercase() {
        return lookup(ch.to_ascii_lowercase()).map(KeyMapping::with_shift);
    }
    lookup(ch)
}

/// Iterates over every character with a direct table entry.
///
/// Uppercase letters and `'\r'` are resolvable but not listed, since they are
/// derived from other entries.
pub fn supported_chars() -> impl Iterator<Item = char> {
    TABLE_ENTRIES.iter().map(|&(ch, _)| ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_letter_is_unmodified() {
        // Arrange / Act
        let mapping = resolve('a').unwrap();

        // Assert
        assert_eq!(mapping.modifier, ModifierFlags::NONE);
        assert_eq!(mapping.keycode, HidKeyCode::KeyA);
    }

    #[test]
    fn test_uppercase_letter_adds_shift_to_lowercase_entry() {
        for (lower, upper) in ('a'..='z').zip('A'..='Z') {
            let base = resolve(lower).unwrap();
            let shifted = resolve(upper).unwrap();
            assert_eq!(shifted.keycode, base.keycode, "{upper}");
            assert_eq!(shifted.modifier.bits(), base.modifier.bits() | 0x02, "{upper}");
        }
    }

    #[test]
    fn test_carriage_return_and_line_feed_both_map_to_enter() {
        assert_eq!(resolve('\r'), Some(KeyMapping::plain(HidKeyCode::Enter)));
        assert_eq!(resolve('\n'), Some(KeyMapping::plain(HidKeyCode::Enter)));
    }

    #[test]
    fn test_shifted_symbols_share_keycode_with_base_key() {
        assert_eq!(resolve('_'), Some(KeyMapping::shifted(HidKeyCode::Minus)));
        assert_eq!(resolve('!'), Some(KeyMapping::shifted(HidKeyCode::Digit1)));
        assert_eq!(resolve('"'), Some(KeyMapping::shifted(HidKeyCode::Quote)));
        assert_eq!(resolve('~'), Some(KeyMapping::shifted(HidKeyCode::Backquote)));
    }

    #[test]
    fn test_unsupported_characters_resolve_to_none() {
        for ch in ['é', 'ß', '€', '\u{0}', '\u{7F}', '\u{8}', '\u{1B}', '\u{B}', 'Ω', '😀'] {
            assert_eq!(resolve(ch), None, "{ch:?} should be unsupported");
        }
    }

    #[test]
    fn test_non_ascii_uppercase_is_unsupported() {
        // 'É' is uppercase but its lowercase form is not in the table either.
        assert_eq!(resolve('É'), None);
    }

    #[test]
    fn test_table_has_no_duplicate_characters() {
        let mut seen = std::collections::HashSet::new();
        for ch in supported_chars() {
            assert!(seen.insert(ch), "{ch:?} defined twice");
        }
        assert_eq!(seen.len(), 71);
    }

    #[test]
    fn test_every_supported_char_resolves_to_its_table_entry() {
        for &(ch, mapping) in TABLE_ENTRIES {
            assert_eq!(resolve(ch), Some(mapping), "{ch:?}");
        }
    }
}
