//! Logical line assembly.
//!
//! A backslash at the end of a physical line joins it with the next one:
//! the backslash, the newline and any whitespace around them collapse into
//! a single space. The joined text is then split on unescaped newlines.

use std::borrow::Cow;

use crate::escape::{is_active, is_escaped};

/// Logical lines of one input text.
///
/// The continuation-joined text is computed once; [`LineAssembler::lines`]
/// can be called any number of times and always yields the same sequence.
#[derive(Debug, Clone)]
pub struct LineAssembler<'src> {
    text: Cow<'src, str>,
}

impl<'src> LineAssembler<'src> {
    /// Join the continuations of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            text: join_continuations(source),
        }
    }

    /// The text after continuation joining.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterate over the logical lines.
    pub fn lines(&self) -> Lines<'_> {
        self.lines_from(Some(0))
    }

    /// Resume iteration at a byte offset previously returned by
    /// [`Lines::offset`].
    pub(crate) fn lines_from(&self, offset: Option<usize>) -> Lines<'_> {
        Lines {
            text: &self.text,
            next: offset,
        }
    }
}

/// Iterator over logical lines, see [`LineAssembler::lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    text: &'a str,
    /// Start of the next line, `None` once the last line was returned.
    next: Option<usize>,
}

impl<'a> Lines<'a> {
    /// Byte offset where the next line starts.
    pub(crate) fn offset(&self) -> Option<usize> {
        self.next
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let end = self.text[start..]
            .match_indices('\n')
            .map(|(i, _)| start + i)
            .find(|&i| is_active(self.text, i));

        match end {
            Some(end) => {
                self.next = Some(end + 1);
                Some(&self.text[start..end])
            }
            None => {
                self.next = None;
                Some(&self.text[start..])
            }
        }
    }
}

/// Collapse every `ws* \ newline ws*` run into one space.
///
/// The backslash must itself be active: `\\` followed by a newline is an
/// escaped backslash at the end of a line, not a continuation.
pub fn join_continuations(source: &str) -> Cow<'_, str> {
    let mut result: Option<String> = None;
    let mut copied = 0;

    for (pos, _) in source.match_indices("\\\n") {
        if pos < copied || is_escaped(source, pos) {
            continue;
        }
        let out = result.get_or_insert_with(|| String::with_capacity(source.len()));
        out.push_str(source[copied..pos].trim_end());
        out.push(' ');

        let after = pos + 2;
        let tail = &source[after..];
        copied = after + (tail.len() - tail.trim_start().len());
    }

    match result {
        None => Cow::Borrowed(source),
        Some(mut out) => {
            out.push_str(&source[copied..]);
            Cow::Owned(out)
        }
    }
}
