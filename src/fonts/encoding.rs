//! Latin-1 text encoding for Base-14 fonts.
//!
//! Generated reports use the standard Type 1 fonts with WinAnsiEncoding, which
//! can show one byte per character. Text is therefore reduced to the Latin-1
//! range (U+0000 to U+00FF) before layout: anything outside is dropped, never
//! substituted, so the surrounding text stays contiguous.

use std::borrow::Cow;

/// Whether a character survives sanitization.
#[inline]
pub fn is_latin1_char(ch: char) -> bool {
    (ch as u32) <= 0xFF
}

/// Number of characters [`sanitize`] would drop.
pub fn dropped_count(text: &str) -> usize {
    text.chars().filter(|&c| !is_latin1_char(c)).count()
}

/// Remove every character outside Latin-1.
///
/// Borrows when nothing needs to be dropped. Never fails, and applying it
/// twice gives the same result as applying it once.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    let dropped = dropped_count(text);
    if dropped == 0 {
        return Cow::Borrowed(text);
    }

    log::debug!(
        "Dropped {} non-Latin-1 character(s) from text of {} chars",
        dropped,
        text.chars().count()
    );
    Cow::Owned(text.chars().filter(|&c| is_latin1_char(c)).collect())
}

/// Encode text as Latin-1 bytes, skipping unencodable characters.
pub fn to_latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|&c| is_latin1_char(c))
        .map(|c| c as u32 as u8)
        .collect()
}

/// Encode text as a PDF literal string `( ... )` for a WinAnsi font.
///
/// Delimiters are backslash-escaped and bytes outside printable ASCII are
/// written as three-digit octal escapes, so the result is plain ASCII.
pub fn encode_literal(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('(');

    for ch in text.chars() {
        match ch {
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_ascii() && !c.is_ascii_control() => result.push(c),
            c if is_latin1_char(c) => result.push_str(&format!("\\{:03o}", c as u32)),
            _ => {},
        }
    }

    result.push(')');
    result
}
