//! Statement patterns.
//!
//! Each matcher takes one statement and returns the pieces it captures, or
//! `None` when the statement has a different shape. Names consist of word
//! characters and `/`, so the `{`, `=` or `"` following a name (and
//! optional whitespace) can never be preceded by a backslash: they are
//! always active when these matchers see them.

use crate::escape::is_active;
use crate::is_word_char;
use crate::statement::delimiters;

/// Split a leading `[\w/]+` name off `text`.
fn take_name(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !(is_word_char(c) || c == '/'))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some(text.split_at(end))
}

/// `ws* name ws*` followed by `marker`; returns the name and what follows
/// the marker.
fn name_then(statement: &str, marker: char) -> Option<(&str, &str)> {
    let (name, rest) = take_name(statement.trim_start())?;
    let rest = rest.trim_start().strip_prefix(marker)?;
    Some((name, rest))
}

/// `ws* name ws* { ws* remainder`.
pub(super) fn group_open(statement: &str) -> Option<(&str, &str)> {
    let (name, rest) = name_then(statement, '{')?;
    Some((name, rest.trim_start()))
}

/// `remainder ws* } ws*` where the `}` is structural; returns the remainder.
pub(super) fn group_close(statement: &str) -> Option<&str> {
    let trimmed = statement.trim_end();
    let brace = trimmed.len().checked_sub(1)?;
    if !trimmed.ends_with('}') {
        return None;
    }
    delimiters(trimmed)
        .any(|(pos, c)| pos == brace && c == '}')
        .then(|| trimmed[..brace].trim_end())
}

/// `ws* name ws* = ws* " fragment`; the fragment runs to the end of the
/// statement, untrimmed.
pub(super) fn multiline_open(statement: &str) -> Option<(&str, &str)> {
    let (name, rest) = name_then(statement, '=')?;
    let fragment = rest.trim_start().strip_prefix('"')?;
    Some((name, fragment))
}

/// `content " tail` at the first active `"`; returns the content and the
/// tail after the quote.
pub(super) fn multiline_end(line: &str) -> Option<(&str, &str)> {
    let quote = line
        .match_indices('"')
        .map(|(pos, _)| pos)
        .find(|&pos| is_active(line, pos))?;
    Some((&line[..quote], &line[quote + 1..]))
}

/// `ws* name ws* = ws* value ws*`; the value may be empty.
pub(super) fn assignment(statement: &str) -> Option<(&str, &str)> {
    let (name, rest) = name_then(statement, '=')?;
    Some((name, rest.trim()))
}
