//! INCAR output writer.

use std::collections::BTreeMap;

use incar_parse::{TagMap, is_tag_path};

use crate::error::FormatError;
use crate::options::FormatOptions;
use crate::scalar::{escape_quoted, escape_value, needs_quotes};

/// Low-level INCAR writer.
///
/// Tracks the group nesting and indentation; tag names are written as
/// given.
pub struct IncarWriter {
    out: String,
    options: FormatOptions,
    depth: usize,
}

impl IncarWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    /// Close any open groups and return the text.
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.close_group();
        }
        self.out
    }

    /// Number of open groups.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write `tag = value` at the current nesting level.
    ///
    /// Continuation lines of a multi-line value are written without
    /// indentation, since they are part of the value.
    pub fn write_tag(&mut self, tag: &str, value: &str) -> Result<(), FormatError> {
        check_tag(tag)?;
        self.write_indent();
        self.out.push_str(tag);
        self.out.push_str(self.options.assign());
        if needs_quotes(value) {
            self.out.push('"');
            self.out.push_str(&escape_quoted(value));
            self.out.push('"');
        } else {
            self.out.push_str(&escape_value(value));
        }
        self.out.push('\n');
        Ok(())
    }

    /// Write `name {` and indent what follows.
    pub fn open_group(&mut self, name: &str) -> Result<(), FormatError> {
        check_tag(name)?;
        self.write_indent();
        self.out.push_str(name);
        self.out.push_str(" {\n");
        self.depth += 1;
        Ok(())
    }

    /// Write the `}` closing the innermost group. Does nothing at top level.
    pub fn close_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.write_indent();
        self.out.push_str("}\n");
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(self.options.indent);
        }
    }
}

impl Default for IncarWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn check_tag(tag: &str) -> Result<(), FormatError> {
    if is_tag_path(tag) {
        Ok(())
    } else {
        Err(FormatError::InvalidTag(tag.to_string()))
    }
}

/// Write a tag map as INCAR text.
pub fn write_tags(tags: &TagMap, options: FormatOptions) -> Result<String, FormatError> {
    if let Some(bad) = tags.keys().find(|tag| !is_tag_path(tag)) {
        return Err(FormatError::InvalidTag(bad.clone()));
    }

    let nest = options.nest_groups;
    let mut writer = IncarWriter::with_options(options);
    let entries: Vec<(&str, &str)> = tags
        .iter()
        .map(|(tag, value)| (tag.as_str(), value.as_str()))
        .collect();
    if nest {
        write_nested(&mut writer, entries)?;
    } else {
        for (tag, value) in entries {
            writer.write_tag(tag, value)?;
        }
    }
    Ok(writer.finish())
}

/// Write `entries` (paths relative to the writer's current group), grouping
/// every path with a further segment under its first segment.
fn write_nested(writer: &mut IncarWriter, entries: Vec<(&str, &str)>) -> Result<(), FormatError> {
    let mut groups: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for (path, value) in entries {
        match path.split_once('/') {
            Some((head, rest)) if !head.is_empty() && !rest.is_empty() => {
                groups.entry(head).or_default().push((rest, value));
            }
            _ => writer.write_tag(path, value)?,
        }
    }
    for (name, children) in groups {
        writer.open_group(name)?;
        write_nested(writer, children)?;
        writer.close_group();
    }
    Ok(())
}
