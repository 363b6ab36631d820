//! Error types for plist report parsing.
//!
//! The variants are the terminal classifications of a parse: any of them
//! aborts the whole document and no partial log is returned. Semantic gaps
//! in the report (a missing optional key, an integer that does not convert,
//! a file index outside the referenced-file table) are deliberately *not*
//! errors; they degrade the affected field to its default and parsing
//! continues. Keeping those two channels separate is what preserves the
//! tolerant behavior of the format's original consumer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scanlog-plist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal parse failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The log file is absent or cannot be read. Raised by the file driver
    /// before the parser ever sees a byte.
    #[error("file \"{}\" does not exist or is not readable", path.display())]
    Unreadable { path: PathBuf },

    /// The document is not a plist container, or is not well-formed XML.
    #[error("malformed plist document: {message}")]
    MalformedRoot {
        message: String,
        /// Byte offset of the lexical error, when quick-xml reported one.
        position: Option<u64>,
    },

    /// The stream ended before the document was structurally complete.
    /// An entirely empty document also reports this.
    #[error("document ended prematurely")]
    PrematureEnd,

    /// A different element type was structurally required at this point.
    #[error("expected a \"{expected}\" element, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: String,
    },

    /// A caller-side precondition was violated.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Shape-mismatch error for a position where `expected` was mandatory.
    /// `found` is the start element actually present, or `None` when the
    /// enclosing element ended instead.
    pub(crate) fn unexpected_shape(expected: &'static str, found: Option<&str>) -> Self {
        Error::UnexpectedShape {
            expected,
            found: match found {
                Some(name) => format!("\"{name}\""),
                None => "end of element".to_string(),
            },
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedRoot {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedRoot {
            message: format!("attribute error: {err}"),
            position: None,
        }
    }
}
