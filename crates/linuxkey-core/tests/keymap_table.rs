//! Integration tests for the character table through the public API.
//!
//! The expected pairs below are written out literally rather than derived, so
//! any accidental edit to the table shows up here as a mismatch.

use linuxkey_core::{keymap::supported_chars, resolve, KeyboardReport};

const SHIFT: u8 = 0x02;

/// (character, modifier, keycode) for every directly mapped character.
const EXPECTED: &[(char, u8, u8)] = &[
    ('a', 0, 0x04), ('b', 0, 0x05), ('c', 0, 0x06), ('d', 0, 0x07),
    ('e', 0, 0x08), ('f', 0, 0x09), ('g', 0, 0x0A), ('h', 0, 0x0B),
    ('i', 0, 0x0C), ('j', 0, 0x0D), ('k', 0, 0x0E), ('l', 0, 0x0F),
    ('m', 0, 0x10), ('n', 0, 0x11), ('o', 0, 0x12), ('p', 0, 0x13),
    ('q', 0, 0x14), ('r', 0, 0x15), ('s', 0, 0x16), ('t', 0, 0x17),
    ('u', 0, 0x18), ('v', 0, 0x19), ('w', 0, 0x1A), ('x', 0, 0x1B),
    ('y', 0, 0x1C), ('z', 0, 0x1D),
    ('1', 0, 0x1E), ('2', 0, 0x1F), ('3', 0, 0x20), ('4', 0, 0x21),
    ('5', 0, 0x22), ('6', 0, 0x23), ('7', 0, 0x24), ('8', 0, 0x25),
    ('9', 0, 0x26), ('0', 0, 0x27),
    ('\n', 0, 0x28), ('\t', 0, 0x2B), (' ', 0, 0x2C),
    ('-', 0, 0x2D), ('=', 0, 0x2E), ('[', 0, 0x2F), (']', 0, 0x30),
    ('\\', 0, 0x31), (';', 0, 0x33), ('\'', 0, 0x34), ('`', 0, 0x35),
    (',', 0, 0x36), ('.', 0, 0x37), ('/', 0, 0x38),
    ('_', SHIFT, 0x2D), ('+', SHIFT, 0x2E), ('{', SHIFT, 0x2F), ('}', SHIFT, 0x30),
    ('|', SHIFT, 0x31), (':', SHIFT, 0x33), ('"', SHIFT, 0x34), ('~', SHIFT, 0x35),
    ('<', SHIFT, 0x36), ('>', SHIFT, 0x37), ('?', SHIFT, 0x38),
    ('!', SHIFT, 0x1E), ('@', SHIFT, 0x1F), ('#', SHIFT, 0x20), ('$', SHIFT, 0x21),
    ('%', SHIFT, 0x22), ('^', SHIFT, 0x23), ('&', SHIFT, 0x24), ('*', SHIFT, 0x25),
    ('(', SHIFT, 0x26), (')', SHIFT, 0x27),
];

#[test]
fn test_every_expected_pair_matches_the_table() {
    for &(ch, modifier, keycode) in EXPECTED {
        let mapping = resolve(ch).unwrap_or_else(|| panic!("{ch:?} must be supported"));
        assert_eq!(mapping.modifier.bits(), modifier, "modifier for {ch:?}");
        assert_eq!(mapping.keycode.as_u8(), keycode, "keycode for {ch:?}");
    }
}

#[test]
fn test_table_lists_exactly_the_expected_characters() {
    let mut listed: Vec<char> = supported_chars().collect();
    let mut expected: Vec<char> = EXPECTED.iter().map(|&(ch, _, _)| ch).collect();
    listed.sort_unstable();
    expected.sort_unstable();
    assert_eq!(listed, expected);
}

#[test]
fn test_all_printable_ascii_is_supported() {
    for byte in 0x20u8..0x7F {
        let ch = char::from(byte);
        assert!(resolve(ch).is_some(), "{ch:?} (0x{byte:02X}) must be supported");
    }
}

#[test]
fn test_resolution_is_stable_across_calls() {
    for ch in supported_chars().chain('A'..='Z') {
        assert_eq!(resolve(ch), resolve(ch));
    }
}

#[test]
fn test_press_reports_for_ab1() {
    let reports: Vec<[u8; 8]> = "Ab1"
        .chars()
        .map(|ch| *KeyboardReport::press(resolve(ch).unwrap()).as_bytes())
        .collect();

    assert_eq!(
        reports,
        vec![
            [SHIFT, 0, 0x04, 0, 0, 0, 0, 0],
            [0, 0, 0x05, 0, 0, 0, 0, 0],
            [0, 0, 0x1E, 0, 0, 0, 0, 0],
        ]
    );
}
