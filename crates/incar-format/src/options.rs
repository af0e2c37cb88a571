//! Formatting options for INCAR output.

/// Options for INCAR output.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Indentation string inside groups (default: 4 spaces)
    pub indent: &'static str,

    /// Write tags sharing a leading path segment inside `NAME { ... }`
    /// blocks instead of as flat `NAME/TAG = value` lines (default: false)
    pub nest_groups: bool,

    /// Write `TAG=value` without spaces around `=` (default: false)
    pub compact: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "    ",
            nest_groups: false,
            compact: false,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest shared path prefixes into group blocks.
    pub fn nested(mut self) -> Self {
        self.nest_groups = true;
        self
    }

    /// Write every tag as one flat line.
    pub fn flat(mut self) -> Self {
        self.nest_groups = false;
        self
    }

    /// Drop the spaces around `=`.
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Set a custom indentation string.
    pub fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn assign(&self) -> &'static str {
        if self.compact { "=" } else { " = " }
    }
}
