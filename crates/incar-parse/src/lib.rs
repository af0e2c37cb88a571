//! Parser for VASP INCAR parameter files.
//!
//! An INCAR file is a list of `TAG = value` assignments. On top of the plain
//! format this parser understands:
//!
//! - `#` and `!` comments running to the end of the line
//! - `;` separating several statements on one line
//! - named groups, `group { tag = value }`, which prefix every tag inside
//!   them; a group name may itself contain `/` (`a/b { ... }`)
//! - quoted values spanning several lines, `tag = "first\nsecond"`
//! - backslash escapes for the reserved characters `= ; # ! { } " \`
//! - a trailing backslash joining two physical lines
//!
//! Tags come out as uppercase, `/`-joined paths. Malformed statements are
//! skipped: parsing never fails.
//!
//! ```
//! let tags = incar_parse::parse("ENCUT = 520 # cutoff\nrelax { ibrion = 2; nsw = 50 }");
//! assert_eq!(tags["ENCUT"], "520");
//! assert_eq!(tags["RELAX/IBRION"], "2");
//! assert_eq!(tags["RELAX/NSW"], "50");
//! ```

use std::collections::BTreeMap;

mod tracing_macros;
#[cfg(any(test, feature = "tracing"))]
#[doc(hidden)]
pub use tracing as __tracing;

pub mod escape;
pub mod lines;
pub mod statement;

mod parser;
pub use parser::{Parser, ParserState};

pub use lines::LineAssembler;

/// Parsed tags, keyed by fully-qualified uppercase tag path.
pub type TagMap = BTreeMap<String, String>;

/// One `(tag, value)` pair produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct TagValue {
    /// Fully-qualified uppercase tag path, e.g. `RELAX/IBRION`.
    pub tag: String,
    /// Value with escapes resolved.
    pub value: String,
}

impl TagValue {
    /// Create a new pair.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Parse INCAR text into a tag map. Later duplicates overwrite earlier ones.
pub fn parse(source: &str) -> TagMap {
    Parser::new(source)
        .map(|TagValue { tag, value }| (tag, value))
        .collect()
}

/// Whether `c` may appear in a tag or group name (besides `/`).
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `name` is a valid tag or group path: one or more word characters
/// or `/`.
pub fn is_tag_path(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| is_word_char(c) || c == '/')
}
