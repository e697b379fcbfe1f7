use regex::Regex;

use crate::extract::traits::{CandidateRecord, Grammar, GrammarKind};

/// Tolerant-positional grammar for raw receipt lines, e.g.
/// `O01234 DUSTY PRODUCT NAME 14.50`.
///
/// The identifier is a leading token of 4–14 characters drawn from digits
/// and `O` (OCR digit/letter confusion) followed by whitespace. The amount
/// is a trailing `\d{1,5}[.,]\d{2}` token anchored at line end, optionally
/// followed by a single currency letter. If the identifier does not match,
/// no candidate is produced at all — even when an amount is present.
pub struct TolerantGrammar {
    id: Regex,
    amount: Regex,
}

impl TolerantGrammar {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            id: Regex::new(r"^([0-9O]{4,14})\s+")?,
            // The amount must stand alone: preceded by start or whitespace.
            amount: Regex::new(r"(?:^|\s)([0-9]{1,5}[.,][0-9]{2})\s*[A-Za-z]?\s*$")?,
        })
    }
}

impl Grammar for TolerantGrammar {
    fn extract(&self, line: &str) -> Option<CandidateRecord> {
        let id_caps = self.id.captures(line)?;
        let amount = self
            .amount
            .captures(line)
            .map(|caps| caps[1].to_string());

        Some(CandidateRecord {
            id: Some(id_caps[1].to_string()),
            amount,
            ..CandidateRecord::default()
        })
    }

    fn kind(&self) -> GrammarKind {
        GrammarKind::TolerantPositional
    }
}
