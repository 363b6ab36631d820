//! Text rendering of parsed analyzer logs.

use scanlog_plist::{AnalyzerLog, Diagnostic, DiagnosticLocation};
use std::io::{self, Write};
use std::path::Path;

/// Render one parsed report as human-readable text.
pub fn text(out: &mut impl Write, path: &Path, log: &AnalyzerLog) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} diagnostic(s)",
        path.display(),
        log.diagnostics.len()
    )?;
    for diagnostic in &log.diagnostics {
        write_diagnostic(out, diagnostic)?;
    }
    Ok(())
}

fn write_diagnostic(out: &mut impl Write, diagnostic: &Diagnostic) -> io::Result<()> {
    write!(
        out,
        "{}: {}",
        location(&diagnostic.location),
        diagnostic.description
    )?;
    if !diagnostic.category.is_empty() {
        write!(out, " [{}]", diagnostic.category)?;
    }
    writeln!(out)?;

    for step in &diagnostic.explaining_steps {
        let indent = "  ".repeat(usize::try_from(step.depth).unwrap_or(0) + 1);
        writeln!(out, "{indent}{}: {}", location(&step.location), step.message)?;
    }
    Ok(())
}

fn location(loc: &DiagnosticLocation) -> String {
    if loc.is_resolved() {
        format!("{}:{}:{}", loc.file_path, loc.line, loc.column)
    } else {
        "<unknown>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlog_plist::ExplainingStep;

    fn sample_log() -> AnalyzerLog {
        AnalyzerLog {
            clang_version: "clang version 3.6.0".to_string(),
            files: vec!["a.cpp".to_string()],
            diagnostics: vec![Diagnostic {
                description: "Dereference of null pointer".to_string(),
                category: "Logic error".to_string(),
                location: DiagnosticLocation::new("a.cpp", 10, 4),
                explaining_steps: vec![
                    ExplainingStep {
                        location: DiagnosticLocation::new("a.cpp", 3, 1),
                        depth: 0,
                        message: "null assigned".to_string(),
                        ..ExplainingStep::default()
                    },
                    ExplainingStep {
                        location: DiagnosticLocation::new("a.cpp", 10, 4),
                        depth: 1,
                        message: "dereference".to_string(),
                        ..ExplainingStep::default()
                    },
                ],
                ..Diagnostic::default()
            }],
        }
    }

    #[test]
    fn test_text_rendering() {
        let mut buffer = Vec::new();
        text(&mut buffer, Path::new("report.plist"), &sample_log()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "report.plist: 1 diagnostic(s)\n\
             a.cpp:10:4: Dereference of null pointer [Logic error]\n\
             \x20 a.cpp:3:1: null assigned\n\
             \x20   a.cpp:10:4: dereference\n"
        );
    }

    #[test]
    fn test_unresolved_location_renders_as_unknown() {
        let mut buffer = Vec::new();
        let log = AnalyzerLog {
            diagnostics: vec![Diagnostic {
                description: "odd finding".to_string(),
                ..Diagnostic::default()
            }],
            ..AnalyzerLog::default()
        };
        text(&mut buffer, Path::new("r.plist"), &log).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("<unknown>: odd finding"));
    }
}
