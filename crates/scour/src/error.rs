use std::path::PathBuf;
use thiserror::Error;

use crate::conf::ConfigError;
use crate::source::SourceError;

/// Fatal, run-terminating failures.
///
/// Governance outcomes (disk halt, memory pause) are not errors — they are
/// reported through the run outcome instead. Upstream source failures keep
/// their own variant so they are never conflated with core I/O.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open input {path}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open output {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("upstream source failed: {0}")]
    Source(#[from] SourceError),
}
