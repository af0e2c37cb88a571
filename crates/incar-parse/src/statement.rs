//! Comment stripping and statement splitting for one logical line.

use std::str::CharIndices;

use crate::escape::is_active;

/// Delimiters reported by [`delimiters`].
const DELIMITERS: [char; 6] = ['#', '!', ';', '=', '{', '}'];

/// Find the structural delimiters of `text`: active `# ! ; = { }` that are
/// not inside a quoted value.
///
/// A quoted value starts at an active `"` following an active `=` (with
/// optional whitespace in between) and ends at the next active `"`, or at
/// the end of `text`.
pub fn delimiters(text: &str) -> Delimiters<'_> {
    Delimiters {
        text,
        chars: text.char_indices(),
        in_quotes: false,
        after_equals: false,
    }
}

/// Iterator returned by [`delimiters`], yielding `(byte offset, char)`.
#[derive(Debug, Clone)]
pub struct Delimiters<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    in_quotes: bool,
    after_equals: bool,
}

impl Iterator for Delimiters<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        for (pos, c) in self.chars.by_ref() {
            if self.in_quotes {
                if c == '"' && is_active(self.text, pos) {
                    self.in_quotes = false;
                }
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            if c == '"' && self.after_equals {
                self.in_quotes = true;
                self.after_equals = false;
                continue;
            }
            if DELIMITERS.contains(&c) && is_active(self.text, pos) {
                self.after_equals = c == '=';
                return Some((pos, c));
            }
            self.after_equals = false;
        }
        None
    }
}

/// Drop everything from the first active `#` or `!` onward.
pub fn strip_comment(line: &str) -> &str {
    match delimiters(line).find(|&(_, c)| c == '#' || c == '!') {
        Some((pos, _)) => &line[..pos],
        None => line,
    }
}

/// Split `line` on every active `;`, left to right.
pub fn split_statements(line: &str) -> impl Iterator<Item = &str> {
    let mut separators = delimiters(line)
        .filter(|&(_, c)| c == ';')
        .map(|(pos, _)| pos);
    let mut start = Some(0);

    std::iter::from_fn(move || {
        let from = start?;
        match separators.next() {
            Some(pos) => {
                start = Some(pos + 1);
                Some(&line[from..pos])
            }
            None => {
                start = None;
                Some(&line[from..])
            }
        }
    })
}

/// The statements of one logical line: comment stripped, then split.
pub fn statements(line: &str) -> impl Iterator<Item = &str> {
    split_statements(strip_comment(line))
}
