pub use super::model::{CandidateRecord, GrammarKind};

pub trait Grammar: Send + Sync {
    /// Attempt to extract a candidate record from one raw line.
    ///
    /// `None` means the line did not match the grammar — an expected
    /// filtering outcome, not an error.
    fn extract(&self, line: &str) -> Option<CandidateRecord>;
    fn kind(&self) -> GrammarKind;
}
