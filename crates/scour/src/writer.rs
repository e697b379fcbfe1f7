use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PipelineError;
use crate::record::SanitizedRecord;

/// Streaming JSON Lines writer: one self-contained record per accepted
/// line, written immediately in arrival order through a single buffered
/// stream held for the run's duration. Memory stays flat regardless of
/// input size; records are never aggregated into one top-level collection.
pub struct StreamingWriter {
    out: BufWriter<File>,
}

impl StreamingWriter {
    pub fn create(path: &Path) -> Result<Self, PipelineError> {
        let file = File::create(path).map_err(|source| PipelineError::OutputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Write failures propagate — a partial record on disk must never go
    /// undetected.
    pub fn write_record(&mut self, record: &SanitizedRecord) -> Result<(), PipelineError> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), PipelineError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ReceiptRecord, Status};

    #[test]
    fn test_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");

        let mut writer = StreamingWriter::create(&path).unwrap();
        for id in ["001", "002"] {
            writer
                .write_record(&SanitizedRecord::Receipt(ReceiptRecord {
                    id: id.to_string(),
                    amount: Some("1.00".to_string()),
                    status: Status::Approved,
                }))
                .unwrap();
        }
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        // Every line is independently parseable.
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }

    #[test]
    fn test_create_fails_on_bad_path() {
        let result = StreamingWriter::create(Path::new("/nonexistent/dir/out.jsonl"));
        assert!(matches!(result, Err(PipelineError::OutputOpen { .. })));
    }
}
