//! Writing INCAR text.
//!
//! The output of [`write_tags`] parses back, with `incar_parse::parse`, to
//! the map it was written from.

mod error;
mod options;
mod scalar;
mod writer;

pub use error::FormatError;
pub use options::FormatOptions;
pub use scalar::{escape_quoted, escape_value, needs_quotes};
pub use writer::{IncarWriter, write_tags};
