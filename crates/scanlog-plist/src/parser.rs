//! Streaming parser for clang static analyzer plist reports.
//!
//! The report is a plist-1.0 XML document: a top-level `dict` holding the
//! clang version banner, a referenced-file table, and an array of diagnostic
//! dicts whose locations address files by index into that table. The parser
//! is a set of mutually recursive readers over [`Cursor`], one per element
//! shape, making a single forward pass and building plain value aggregates
//! bottom-up.
//!
//! Failure handling follows one rule throughout: a shape mismatch (the wrong
//! element where `string`/`array`/`integer`/`dict` is mandatory, a lexical
//! error, a truncated document) aborts the whole parse, while a content gap
//! (missing optional key, an integer that does not convert, a file index
//! outside the table) silently degrades the affected field and parsing
//! continues. The degrade channel never travels through [`Error`].

use crate::cursor::{Cursor, StartTag};
use crate::error::{Error, Result};
use crate::types::{AnalyzerLog, Diagnostic, DiagnosticLocation, ExplainingStep};
use tracing::debug;

/// Parse a plist report from its full text.
///
/// # Example
///
/// ```rust
/// let log = scanlog_plist::parse(r#"
/// <plist version="1.0"><dict>
///   <key>files</key><array><string>main.cpp</string></array>
///   <key>diagnostics</key><array></array>
/// </dict></plist>"#).unwrap();
/// assert_eq!(log.files, vec!["main.cpp"]);
/// assert!(log.diagnostics.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error for documents that are lexically malformed, truncated,
/// not rooted in a `plist` element, or that put the wrong element where a
/// specific one is structurally required. No partial log is returned on
/// failure.
pub fn parse(content: &str) -> Result<AnalyzerLog> {
    let mut reader = PlistReader::new(content);
    reader.read_plist()?;
    Ok(reader.finish())
}

struct PlistReader<'a> {
    cursor: Cursor<'a>,
    clang_version: String,
    files: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> PlistReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            cursor: Cursor::new(content),
            clang_version: String::new(),
            files: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> AnalyzerLog {
        AnalyzerLog {
            clang_version: self.clang_version,
            files: self.files,
            diagnostics: self.diagnostics,
        }
    }

    /// Root validation. A root element that is not `plist` is fatal; a
    /// `plist` root whose `version` attribute is not `1.0` yields an empty
    /// result with no error. The asymmetry matches the behavior of the
    /// tool this format was written for.
    fn read_plist(&mut self) -> Result<()> {
        let Some(root) = self.cursor.next_start()? else {
            return Err(Error::PrematureEnd);
        };
        if root.name != "plist" {
            return Err(Error::MalformedRoot {
                message: format!("root element is \"{}\", not \"plist\"", root.name),
                position: None,
            });
        }
        if root.attribute("version") == Some("1.0") {
            self.read_top_level_dict()?;
        } else {
            debug!("plist version attribute is not 1.0, yielding an empty log");
        }
        Ok(())
    }

    /// The top-level dict. Recognized keys are `clang_version`, `files` and
    /// `diagnostics`; any other key's value element is skipped structurally.
    /// `files` must appear before `diagnostics` in the document for location
    /// resolution to work, which is how the analyzer always writes it.
    fn read_top_level_dict(&mut self) -> Result<()> {
        let start = self.cursor.next_start()?;
        self.expect_element("dict", &start)?;

        while let Some(element) = self.cursor.next_start()? {
            if element.name == "key" {
                let key = self.cursor.element_text()?;
                match key.as_str() {
                    "clang_version" => self.clang_version = self.read_string()?,
                    "files" => self.files = self.read_string_array()?,
                    "diagnostics" => self.read_diagnostics_array()?,
                    // Unrecognized key: its value element is consumed by the
                    // skip branch on the next iteration.
                    _ => {}
                }
            } else {
                self.cursor.skip_current()?;
            }
        }
        Ok(())
    }

    fn read_diagnostics_array(&mut self) -> Result<()> {
        let start = self.cursor.next_start()?;
        self.expect_element("array", &start)?;

        while let Some(element) = self.cursor.next_start()? {
            self.expect_element("dict", &Some(element))?;
            self.read_diagnostic_dict()?;
        }
        Ok(())
    }

    /// One diagnostic dict, cursor already inside it. A dict with no
    /// recognized keys still appends a default diagnostic; absence of
    /// content is not an error here.
    fn read_diagnostic_dict(&mut self) -> Result<()> {
        let mut diagnostic = Diagnostic::default();

        while let Some(element) = self.cursor.next_start()? {
            if element.name == "key" {
                let key = self.cursor.element_text()?;
                match key.as_str() {
                    "path" => diagnostic.explaining_steps = self.read_path_array()?,
                    "description" => diagnostic.description = self.read_string()?,
                    "category" => diagnostic.category = self.read_string()?,
                    "type" => diagnostic.issue_type = self.read_string()?,
                    "issue_context_kind" => diagnostic.issue_context_kind = self.read_string()?,
                    "issue_context" => diagnostic.issue_context = self.read_string()?,
                    "location" => diagnostic.location = self.read_location_dict(false)?,
                    _ => {}
                }
            } else {
                self.cursor.skip_current()?;
            }
        }

        self.diagnostics.push(diagnostic);
        Ok(())
    }

    fn read_path_array(&mut self) -> Result<Vec<ExplainingStep>> {
        let start = self.cursor.next_start()?;
        self.expect_element("array", &start)?;

        let mut steps = Vec::new();
        while let Some(element) = self.cursor.next_start()? {
            self.expect_element("dict", &Some(element))?;
            if let Some(step) = self.read_path_dict()? {
                steps.push(step);
            }
        }
        Ok(steps)
    }

    /// One path dict, cursor already inside it. Returns `None` for dicts
    /// that produce no step: non-event nodes (control-flow edges carry no
    /// display content) and event nodes without a parseable depth.
    fn read_path_dict(&mut self) -> Result<Option<ExplainingStep>> {
        // Kind gate: only dicts whose first key is kind=event are read.
        match self.cursor.next_start()? {
            None => return Ok(None),
            Some(first) if first.name == "key" => {
                let key = self.cursor.element_text()?;
                if key != "kind" {
                    self.cursor.skip_current()?;
                    return Ok(None);
                }
                let kind = self.read_string()?;
                if kind != "event" {
                    self.cursor.skip_current()?;
                    return Ok(None);
                }
            }
            Some(_) => {
                // First child is not a key element at all: close it, then
                // the rest of the dict.
                self.cursor.skip_current()?;
                self.cursor.skip_current()?;
                return Ok(None);
            }
        }

        let mut step = ExplainingStep::default();
        let mut depth_ok = false;

        while let Some(element) = self.cursor.next_start()? {
            if element.name == "key" {
                let key = self.cursor.element_text()?;
                match key.as_str() {
                    "location" => step.location = self.read_location_dict(false)?,
                    "ranges" => step.ranges = self.read_ranges_array()?,
                    "depth" => match self.read_integer()? {
                        Some(depth) => {
                            step.depth = depth;
                            depth_ok = true;
                        }
                        None => depth_ok = false,
                    },
                    "message" => step.message = self.read_string()?,
                    "extended_message" => step.extended_message = self.read_string()?,
                    _ => {}
                }
            } else {
                self.cursor.skip_current()?;
            }
        }

        if !depth_ok {
            debug!("discarding event step without a parseable depth");
            return Ok(None);
        }
        Ok(Some(step))
    }

    /// A location dict: `line`, `col`, `file`, each an independent integer.
    /// The location resolves only when all three parse and the file index is
    /// strictly inside the referenced-file table; anything less returns the
    /// unresolved default. With `element_is_read` the cursor is already
    /// inside the dict (the ranges reader positions it there).
    fn read_location_dict(&mut self, element_is_read: bool) -> Result<DiagnosticLocation> {
        if !element_is_read {
            let start = self.cursor.next_start()?;
            self.expect_element("dict", &start)?;
        }

        let mut line = None;
        let mut column = None;
        let mut file_index = None;

        while let Some(element) = self.cursor.next_start()? {
            if element.name == "key" {
                let key = self.cursor.element_text()?;
                match key.as_str() {
                    "line" => line = self.read_integer()?,
                    "col" => column = self.read_integer()?,
                    "file" => file_index = self.read_integer()?,
                    _ => {}
                }
            } else {
                self.cursor.skip_current()?;
            }
        }

        let (Some(line), Some(column), Some(index)) = (line, column, file_index) else {
            return Ok(DiagnosticLocation::default());
        };
        let Some(file_path) = usize::try_from(index)
            .ok()
            .and_then(|i| self.files.get(i))
        else {
            debug!(index, "file index outside the referenced-file table");
            return Ok(DiagnosticLocation::default());
        };
        Ok(DiagnosticLocation::new(file_path.clone(), line, column))
    }

    /// The ranges value is an array of arrays of location dicts. Only the
    /// first inner array is read, one start location per dict; the remaining
    /// outer-array siblings are skipped wholesale.
    fn read_ranges_array(&mut self) -> Result<Vec<DiagnosticLocation>> {
        let start = self.cursor.next_start()?;
        self.expect_element("array", &start)?;

        let mut result = Vec::new();
        let Some(inner) = self.cursor.next_start()? else {
            return Ok(result);
        };
        self.expect_element("array", &Some(inner))?;

        while let Some(element) = self.cursor.next_start()? {
            self.expect_element("dict", &Some(element))?;
            result.push(self.read_location_dict(true)?);
        }

        self.cursor.skip_current()?;
        Ok(result)
    }

    fn read_string(&mut self) -> Result<String> {
        let start = self.cursor.next_start()?;
        self.expect_element("string", &start)?;
        self.cursor.element_text()
    }

    fn read_string_array(&mut self) -> Result<Vec<String>> {
        let start = self.cursor.next_start()?;
        self.expect_element("array", &start)?;

        let mut result = Vec::new();
        while let Some(element) = self.cursor.next_start()? {
            self.expect_element("string", &Some(element))?;
            let string = self.cursor.element_text()?;
            if !string.is_empty() {
                result.push(string);
            }
        }
        Ok(result)
    }

    /// Reads an `integer` element. A wrong element shape is fatal; text that
    /// does not convert to an integer is `Ok(None)`, leaving materiality to
    /// the caller. Depth validity and location resolution are built on this.
    fn read_integer(&mut self) -> Result<Option<i32>> {
        let start = self.cursor.next_start()?;
        self.expect_element("integer", &start)?;
        let text = self.cursor.element_text()?;
        Ok(text.trim().parse().ok())
    }

    fn expect_element(&self, expected: &'static str, found: &Option<StartTag>) -> Result<()> {
        match found {
            Some(tag) if tag.name == expected => Ok(()),
            Some(tag) => Err(Error::unexpected_shape(expected, Some(&tag.name))),
            None => Err(Error::unexpected_shape(expected, None)),
        }
    }
}
