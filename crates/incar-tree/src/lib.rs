//! INCAR documents and input files.
//!
//! [`Tags`] is a parsed INCAR document with case-insensitive lookup;
//! [`Incar`] is an INCAR file that lives either on disk or in memory.
//!
//! ```
//! use incar_tree::Tags;
//!
//! let tags = Tags::parse("encut = 520\nrelax { nsw = 50 }");
//! assert_eq!(tags.get("Encut"), Some("520"));
//! assert_eq!(tags.get("relax/nsw"), Some("50"));
//! ```

mod error;
mod file;
mod tags;

pub use error::IncarError;
pub use file::Incar;
pub use incar_format::{FormatError, FormatOptions};
pub use incar_parse::{TagMap, TagValue};
pub use tags::Tags;
