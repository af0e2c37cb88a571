//! Group-aware statement parser and multi-line value collector.

use std::collections::VecDeque;
use std::iter;

use crate::escape::resolve;
use crate::lines::LineAssembler;
use crate::statement::statements;
use crate::{TagValue, debug, trace};

mod grammar;

/// Mutable state threaded across the lines of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Segments of the currently open groups, outermost first.
    pub group_path: Vec<String>,
    /// For every open group, the number of segments its name added.
    pub depth_stack: Vec<usize>,
    /// Tag of the multi-line value being collected, if any.
    pub pending_tag: Option<String>,
    /// Fragments collected so far for `pending_tag`.
    pub pending_lines: Vec<String>,
}

impl ParserState {
    /// Create an empty state: no open group, no pending value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a multi-line value is being collected.
    pub fn in_multiline(&self) -> bool {
        self.pending_tag.is_some()
    }

    /// Feed one logical line, pushing the pairs it completes onto `out`.
    pub fn feed_line(&mut self, line: &str, out: &mut VecDeque<TagValue>) {
        if self.in_multiline() {
            self.collect_line(line, out);
            return;
        }
        for statement in statements(line) {
            self.parse_statement(statement, out);
        }
    }

    /// Parse one statement against the open groups.
    ///
    /// Tried in order: group open, group close, start of a quoted value,
    /// plain assignment. Anything else is dropped.
    pub fn parse_statement(&mut self, statement: &str, out: &mut VecDeque<TagValue>) {
        if let Some((name, rest)) = grammar::group_open(statement) {
            self.open_group(name);
            self.parse_statement(rest, out);
        } else if let Some(rest) = grammar::group_close(statement) {
            self.parse_statement(rest, out);
            self.close_group();
        } else if let Some((name, fragment)) = grammar::multiline_open(statement) {
            let tag = self.qualify(name);
            trace!(%tag, "quoted value starts");
            self.pending_tag = Some(tag);
            self.collect_line(fragment, out);
        } else if let Some((name, value)) = grammar::assignment(statement) {
            out.push_back(TagValue {
                tag: self.qualify(name),
                value: resolve(value).into_owned(),
            });
        } else if !statement.trim().is_empty() {
            trace!(statement, "skipping unrecognized statement");
        }
    }

    /// Add one raw line to the pending quoted value.
    ///
    /// An active `"` finishes the value; what follows it on the line is
    /// parsed as ordinary statements.
    pub fn collect_line(&mut self, line: &str, out: &mut VecDeque<TagValue>) {
        let Some((content, tail)) = grammar::multiline_end(line) else {
            self.pending_lines.push(line.to_string());
            return;
        };
        self.pending_lines.push(content.to_string());
        let value = resolve(&self.pending_lines.join("\n")).into_owned();
        self.pending_lines.clear();
        if let Some(tag) = self.pending_tag.take() {
            trace!(%tag, "quoted value ends");
            out.push_back(TagValue { tag, value });
        }
        for statement in statements(tail) {
            self.parse_statement(statement, out);
        }
    }

    fn open_group(&mut self, name: &str) {
        let segments = name.split('/').map(str::to_string);
        let before = self.group_path.len();
        self.group_path.extend(segments);
        self.depth_stack.push(self.group_path.len() - before);
        trace!(name, depth = self.depth_stack.len(), "open group");
    }

    fn close_group(&mut self) {
        match self.depth_stack.pop() {
            Some(count) => {
                let keep = self.group_path.len().saturating_sub(count);
                self.group_path.truncate(keep);
                trace!(depth = self.depth_stack.len(), "close group");
            }
            None => {
                debug!("ignoring '}}' without an open group");
            }
        }
    }

    /// Full uppercase tag path for `name` under the open groups.
    fn qualify(&self, name: &str) -> String {
        let segments: Vec<&str> = self
            .group_path
            .iter()
            .map(String::as_str)
            .chain(iter::once(name))
            .collect();
        segments.join("/").to_uppercase()
    }
}

/// Pull-based parser yielding every `(tag, value)` pair in input order,
/// duplicates included.
///
/// ```
/// use incar_parse::{Parser, TagValue};
///
/// let pairs: Vec<_> = Parser::new("x = 1\nx = 2").collect();
/// assert_eq!(pairs, vec![TagValue::new("X", "1"), TagValue::new("X", "2")]);
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'src> {
    lines: LineAssembler<'src>,
    /// Offset of the next logical line, `None` at the end.
    cursor: Option<usize>,
    state: ParserState,
    queue: VecDeque<TagValue>,
}

impl<'src> Parser<'src> {
    /// Create a parser over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: LineAssembler::new(source),
            cursor: Some(0),
            state: ParserState::new(),
            queue: VecDeque::new(),
        }
    }

    /// The parser state between lines.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Parse everything that is left and return the final state.
    pub fn finish(mut self) -> ParserState {
        while self.next().is_some() {}
        if let Some(tag) = &self.state.pending_tag {
            debug!(%tag, "input ends inside a quoted value");
        }
        self.state
    }
}

impl Iterator for Parser<'_> {
    type Item = TagValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.queue.pop_front() {
                return Some(pair);
            }
            let mut lines = self.lines.lines_from(self.cursor);
            let line = lines.next()?;
            self.cursor = lines.offset();
            self.state.feed_line(line, &mut self.queue);
        }
    }
}
