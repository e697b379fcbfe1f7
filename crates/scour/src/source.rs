use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Tagged upstream failure classification. Producers feeding the pipeline
/// (file readers today, reconnaissance output tomorrow) report failures
/// through these variants so they are never conflated with core pipeline
/// errors, and absence of data is never confused with failure.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("upstream connection failure: {0}")]
    Connection(String),

    #[error("unclassified upstream failure: {0}")]
    Unclassified(String),
}

impl SourceError {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Io(_) => "io",
            SourceError::Connection(_) => "connection",
            SourceError::Unclassified(_) => "unclassified",
        }
    }
}

/// One input line. Created per line, consumed immediately, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Zero-based input line index.
    pub index: u64,
    pub text: String,
}

pub trait LineSource {
    /// `None` is end of input; a failure is always `Some(Err(..))`.
    fn next_line(&mut self) -> Option<Result<RawLine, SourceError>>;
}

/// File-backed line source: UTF-8 text, one logical record per line.
pub struct FileSource {
    reader: BufReader<File>,
    next_index: u64,
}

impl FileSource {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
            next_index: 0,
        })
    }
}

impl LineSource for FileSource {
    fn next_line(&mut self) -> Option<Result<RawLine, SourceError>> {
        let mut text = String::new();
        match self.reader.read_line(&mut text) {
            Ok(0) => None,
            Ok(_) => {
                while text.ends_with('\n') || text.ends_with('\r') {
                    text.pop();
                }
                let index = self.next_index;
                self.next_index += 1;
                Some(Ok(RawLine { index, text }))
            }
            Err(e) => Some(Err(SourceError::Io(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_lines_and_indices() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first").unwrap();
        writeln!(file, "second").unwrap();
        write!(file, "third").unwrap(); // No trailing newline

        let mut source = FileSource::open(file.path()).unwrap();
        let lines: Vec<RawLine> = std::iter::from_fn(|| source.next_line())
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RawLine { index: 0, text: "first".to_string() });
        assert_eq!(lines[2], RawLine { index: 2, text: "third".to_string() });
        assert!(source.next_line().is_none());
    }

    #[test]
    fn test_missing_file_fails_on_open() {
        assert!(FileSource::open(Path::new("/nonexistent/input.txt")).is_err());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(SourceError::Connection("refused".into()).kind(), "connection");
        assert_eq!(SourceError::Unclassified("?".into()).kind(), "unclassified");
    }
}
