use regex::Regex;

use crate::extract::traits::{CandidateRecord, Grammar, GrammarKind};

/// Structured-labeled grammar for exported catalog lines, e.g.
/// `ID: O123-AB | PRODUCT: Wat3r Bottle | PRICE: S/ 10.50 | Stock 5`.
///
/// `ID:` and `PRODUCT:` are mandatory; `PRICE:` (with an optional `S/`
/// currency marker) and `Stock` are optional. Labels may sit anywhere on
/// the line but must appear in that relative order: each field is searched
/// only in the remainder after the previous match. First match wins — there
/// is no multi-candidate scanning within a line.
pub struct StructuredGrammar {
    id: Regex,
    name: Regex,
    price: Regex,
    stock: Regex,
}

impl StructuredGrammar {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            id: Regex::new(r"(?i)ID:\s*([A-Z0-9-]+)")?,
            name: Regex::new(r"(?i)PRODUCT:\s*([^|]+)")?,
            price: Regex::new(r"(?i)PRICE:\s*(?:S/\s*)?([0-9]+(?:[.,][0-9]+)?)")?,
            stock: Regex::new(r"(?i)Stock\s*([0-9]+)")?,
        })
    }
}

impl Grammar for StructuredGrammar {
    fn extract(&self, line: &str) -> Option<CandidateRecord> {
        let id_caps = self.id.captures(line)?;
        let name_caps = self.name.captures_at(line, id_caps.get(0)?.end())?;

        let mut cursor = name_caps.get(0)?.end();
        let price = match self.price.captures_at(line, cursor) {
            Some(caps) => {
                if let Some(m) = caps.get(0) {
                    cursor = m.end();
                }
                Some(caps[1].to_string())
            }
            None => None,
        };
        let stock = self
            .stock
            .captures_at(line, cursor)
            .map(|caps| caps[1].to_string());

        Some(CandidateRecord {
            id: Some(id_caps[1].to_string()),
            name: Some(name_caps[1].to_string()),
            price,
            stock,
            ..CandidateRecord::default()
        })
    }

    fn kind(&self) -> GrammarKind {
        GrammarKind::StructuredLabeled
    }
}
