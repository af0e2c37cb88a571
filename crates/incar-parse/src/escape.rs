//! Backslash escaping.
//!
//! A reserved character preceded by an odd number of backslashes is escaped
//! (literal text); preceded by an even number, including zero, it is active.

use std::borrow::Cow;

/// Characters that carry meaning in the grammar and can be escaped.
pub const RESERVED: [char; 8] = ['=', ';', '#', '!', '{', '}', '"', '\\'];

/// Whether `c` is one of the [`RESERVED`] characters.
#[inline]
pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// Number of consecutive backslashes directly before byte offset `pos`.
#[inline]
pub fn backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

/// Whether the character at byte offset `pos` is escaped.
#[inline]
pub fn is_escaped(text: &str, pos: usize) -> bool {
    backslashes_before(text, pos) % 2 == 1
}

/// Whether the character at byte offset `pos` acts as a delimiter.
#[inline]
pub fn is_active(text: &str, pos: usize) -> bool {
    !is_escaped(text, pos)
}

/// Replace every `\` + reserved character with the character itself.
///
/// Scanning is left to right and sequences do not overlap, so `\\\=`
/// becomes `\=`. Backslashes in front of anything else are kept.
pub fn resolve(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }

    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && is_reserved(next)
        {
            result.push(next);
            chars.next();
            continue;
        }
        result.push(c);
    }

    if result.len() == value.len() {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(result)
    }
}
