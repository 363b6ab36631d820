//! File-level driver around [`crate::parse`].

use crate::error::{Error, Result};
use crate::types::AnalyzerLog;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse one analyzer log file.
///
/// The path is checked for existence and readability before the parser is
/// invoked, so an absent file reports [`Error::Unreadable`] rather than a
/// parse failure.
///
/// # Errors
///
/// [`Error::Internal`] for an empty path, [`Error::Unreadable`] when the
/// file is absent or cannot be read, otherwise whatever [`crate::parse`]
/// reports for the file's content.
pub fn read_log_file(path: impl AsRef<Path>) -> Result<AnalyzerLog> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::Internal("empty log file path".to_string()));
    }
    if !path.is_file() {
        return Err(Error::Unreadable {
            path: path.to_owned(),
        });
    }

    let content = fs::read_to_string(path).map_err(|_| Error::Unreadable {
        path: path.to_owned(),
    })?;
    debug!(path = %path.display(), bytes = content.len(), "parsing analyzer log");
    crate::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_LOG: &str = r#"<plist version="1.0"><dict>
        <key>clang_version</key><string>clang version 3.6.0</string>
        <key>files</key><array><string>a.cpp</string></array>
        <key>diagnostics</key><array></array>
        </dict></plist>"#;

    #[test]
    fn test_empty_path_is_internal_error() {
        assert!(matches!(read_log_file(""), Err(Error::Internal(_))));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = read_log_file("/nonexistent/analyzer.plist");
        assert!(matches!(result, Err(Error::Unreadable { .. })));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_log_file(dir.path());
        assert!(matches!(result, Err(Error::Unreadable { .. })));
    }

    #[test]
    fn test_reads_log_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL_LOG.as_bytes()).unwrap();
        let log = read_log_file(file.path()).unwrap();
        assert_eq!(log.clang_version, "clang version 3.6.0");
        assert_eq!(log.files, vec!["a.cpp"]);
    }

    #[test]
    fn test_empty_file_is_premature_end() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = read_log_file(file.path());
        assert!(matches!(result, Err(Error::PrematureEnd)));
    }
}
