//! Value types produced by a parse: locations, explaining steps, diagnostics,
//! and the log-level aggregate.
//!
//! Everything here is built once during a parse pass and read-only afterwards.
//! Document order is preserved throughout: diagnostics appear in the order
//! their dicts appear under the `diagnostics` key, steps in the order of
//! their path array, ranges in the order of their range dicts.

use serde::{Deserialize, Serialize};

/// A resolved source location: file path plus 1-based line and column.
///
/// The default value is the "unresolved" location (empty path, zeroed
/// line/column). A location only resolves when the report supplied all three
/// of `line`, `col` and `file` and the file index pointed inside the
/// referenced-file table; anything less degrades to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLocation {
    /// Path of the referenced file, resolved from the file table.
    pub file_path: String,
    /// 1-based line number.
    pub line: i32,
    /// 1-based column number.
    pub column: i32,
}

impl DiagnosticLocation {
    pub fn new(file_path: impl Into<String>, line: i32, column: i32) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
        }
    }

    /// Whether this location was resolved against the referenced-file table.
    pub fn is_resolved(&self) -> bool {
        !self.file_path.is_empty()
    }
}

/// One node in a diagnostic's explanation path.
///
/// Only "event" nodes from the report survive parsing; control-flow edge
/// nodes carry no human-readable content and are dropped. A step without a
/// parseable `depth` is dropped as well, so every step the parser returns has
/// a meaningful depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainingStep {
    pub location: DiagnosticLocation,
    /// Start locations of the step's secondary ranges, in document order.
    pub ranges: Vec<DiagnosticLocation>,
    /// Nesting level in the analyzer's explanation tree.
    pub depth: i32,
    pub message: String,
    pub extended_message: String,
}

/// One issue reported by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub description: String,
    /// Coarse category, e.g. "Logic error".
    pub category: String,
    /// Check classification label from the report's `type` key.
    #[serde(rename = "type")]
    pub issue_type: String,
    pub issue_context_kind: String,
    pub issue_context: String,
    pub location: DiagnosticLocation,
    /// The path the analyzer walked to justify the finding, possibly empty.
    pub explaining_steps: Vec<ExplainingStep>,
}

/// A fully parsed analyzer log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerLog {
    /// Version banner of the clang that produced the report, possibly empty.
    pub clang_version: String,
    /// Referenced-file table. Locations in the raw report address files by
    /// 0-based index into this list; its order is fixed at read time.
    pub files: Vec<String>,
    /// All diagnostics, in document order.
    pub diagnostics: Vec<Diagnostic>,
}
