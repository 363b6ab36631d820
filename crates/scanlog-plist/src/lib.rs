//! Streaming parsing of clang static analyzer plist reports.
//!
//! The clang static analyzer writes its findings as plist-1.0 XML documents:
//! a referenced-file table, a version banner, and a list of diagnostics,
//! each with a primary location and a path of "explaining steps" the
//! analyzer walked to justify the finding. This crate parses those reports
//! in one streaming pass into plain value types.
//!
//! The main entry points are:
//! - [`parse`]: parse a report from its full text
//! - [`read_log_file`]: check and read a report file, then parse it
//!
//! # Example
//!
//! ```rust
//! let log = scanlog_plist::parse(r#"<plist version="1.0"><dict>
//!   <key>files</key><array><string>main.cpp</string></array>
//!   <key>diagnostics</key><array>
//!     <dict><key>description</key><string>Memory leak</string></dict>
//!   </array>
//! </dict></plist>"#).unwrap();
//!
//! assert_eq!(log.diagnostics[0].description, "Memory leak");
//! ```
//!
//! # Tolerance model
//!
//! Structural problems (not a plist, truncated XML, the wrong element where
//! a specific one is required) abort the parse with an [`Error`] and no
//! partial result. Content gaps (missing optional keys, integers that do not
//! convert, file indices outside the table) never error: the affected field
//! degrades to its default and parsing continues. Real-world reports rely on
//! that tolerance heavily.

mod cursor;

pub mod error;
pub mod parser;
pub mod reader;
pub mod types;

pub use error::{Error, Result};
pub use parser::parse;
pub use reader::read_log_file;
pub use types::{AnalyzerLog, Diagnostic, DiagnosticLocation, ExplainingStep};
