//! `application/x-www-form-urlencoded` decoding.
//!
//! Browsers submit the relay form as `text=...&token=...` with spaces encoded
//! as `+` and everything else outside the unreserved set as `%XX` UTF-8 bytes.

use std::collections::HashMap;

/// Decoded form fields.  When a name repeats, the first value wins.
pub type FormFields = HashMap<String, String>;

/// Decodes a urlencoded body into its fields.
///
/// Never fails: malformed `%` escapes are kept literally and invalid UTF-8
/// after decoding is replaced with U+FFFD.
pub fn parse_urlencoded(body: &str) -> FormFields {
    let mut fields = FormFields::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields
            .entry(percent_decode(name))
            .or_insert_with(|| percent_decode(value));
    }
    fields
}

/// Decodes `+` and `%XX` escapes.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    out.push((hex_value(hi) << 4) | hex_value(lo));
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
