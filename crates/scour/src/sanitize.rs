use crate::extract::{CandidateRecord, GrammarKind};
use crate::record::{CatalogRecord, ReceiptRecord, SanitizedRecord, Status};

/// Deterministic, non-probabilistic glyph correction and normalization.
///
/// Applied only to fields the grammar matched; never turns a candidate into
/// a second "no match" — individual fields are filled or nulled instead.
pub struct Sanitizer {
    fix_name_glyphs: bool,
}

impl Sanitizer {
    pub fn new(fix_name_glyphs: bool) -> Self {
        Self { fix_name_glyphs }
    }

    pub fn sanitize(&self, kind: GrammarKind, candidate: CandidateRecord) -> SanitizedRecord {
        match kind {
            GrammarKind::StructuredLabeled => SanitizedRecord::Catalog(CatalogRecord {
                id: correct_id(candidate.id.as_deref().unwrap_or_default()),
                name: candidate.name.map(|name| self.correct_name(&name)),
                price: candidate.price.and_then(|price| parse_price(&price)),
                stock: candidate
                    .stock
                    .and_then(|stock| stock.parse().ok())
                    .unwrap_or(0),
            }),
            GrammarKind::TolerantPositional => {
                let status = if candidate.id.is_some() && candidate.amount.is_some() {
                    Status::Approved
                } else {
                    Status::Rejected
                };
                SanitizedRecord::Receipt(ReceiptRecord {
                    id: correct_id(candidate.id.as_deref().unwrap_or_default()),
                    amount: candidate.amount.map(|amount| amount.replace(',', ".")),
                    status,
                })
            }
        }
    }

    fn correct_name(&self, name: &str) -> String {
        let trimmed = name.trim();
        if self.fix_name_glyphs {
            // OCR confuses 'e' with '3' in this corpus.
            trimmed.replace('3', "e")
        } else {
            trimmed.to_string()
        }
    }
}

/// A leading 'O' is an OCR hallucination for '0'. First character only;
/// interior occurrences are preserved.
fn correct_id(id: &str) -> String {
    match id.strip_prefix('O') {
        Some(rest) => format!("0{rest}"),
        None => id.to_string(),
    }
}

fn parse_price(price: &str) -> Option<f64> {
    price.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured_candidate() -> CandidateRecord {
        CandidateRecord {
            id: Some("O123-AB".to_string()),
            name: Some("Wat3r Bottle ".to_string()),
            price: Some("10.50".to_string()),
            stock: Some("5".to_string()),
            ..CandidateRecord::default()
        }
    }

    // ── Structured-labeled normalization ────────────────────────

    #[test]
    fn test_catalog_sanitization() {
        let record = Sanitizer::new(true)
            .sanitize(GrammarKind::StructuredLabeled, structured_candidate());

        assert_eq!(
            record,
            SanitizedRecord::Catalog(CatalogRecord {
                id: "0123-AB".to_string(),
                name: Some("Water Bottle".to_string()),
                price: Some(10.5),
                stock: 5,
            })
        );
    }

    #[test]
    fn test_leading_o_only() {
        assert_eq!(correct_id("O1O2-X"), "01O2-X");
        assert_eq!(correct_id("AO12"), "AO12");
        assert_eq!(correct_id("123"), "123");
    }

    #[test]
    fn test_name_glyph_fix_toggle() {
        let mut candidate = structured_candidate();
        candidate.name = Some("Mod3l 3000".to_string());

        let fixed = Sanitizer::new(true).sanitize(GrammarKind::StructuredLabeled, candidate.clone());
        let SanitizedRecord::Catalog(fixed) = fixed else { panic!() };
        assert_eq!(fixed.name.as_deref(), Some("Model e000"));

        let kept = Sanitizer::new(false).sanitize(GrammarKind::StructuredLabeled, candidate);
        let SanitizedRecord::Catalog(kept) = kept else { panic!() };
        assert_eq!(kept.name.as_deref(), Some("Mod3l 3000"));
    }

    #[test]
    fn test_stock_defaults_to_zero() {
        let mut candidate = structured_candidate();
        candidate.stock = None;

        let record = Sanitizer::new(true).sanitize(GrammarKind::StructuredLabeled, candidate);
        let SanitizedRecord::Catalog(record) = record else { panic!() };
        assert_eq!(record.stock, 0);
    }

    #[test]
    fn test_price_comma_normalized() {
        let mut candidate = structured_candidate();
        candidate.price = Some("4,20".to_string());

        let record = Sanitizer::new(true).sanitize(GrammarKind::StructuredLabeled, candidate);
        let SanitizedRecord::Catalog(record) = record else { panic!() };
        assert_eq!(record.price, Some(4.2));
    }

    // ── Tolerant-positional normalization ───────────────────────

    #[test]
    fn test_receipt_approved() {
        let candidate = CandidateRecord {
            id: Some("O01234".to_string()),
            amount: Some("14,50".to_string()),
            ..CandidateRecord::default()
        };

        let record = Sanitizer::new(true).sanitize(GrammarKind::TolerantPositional, candidate);
        assert_eq!(
            record,
            SanitizedRecord::Receipt(ReceiptRecord {
                id: "001234".to_string(),
                amount: Some("14.50".to_string()),
                status: Status::Approved,
            })
        );
    }

    #[test]
    fn test_receipt_rejected_without_amount() {
        let candidate = CandidateRecord {
            id: Some("00420".to_string()),
            ..CandidateRecord::default()
        };

        let record = Sanitizer::new(true).sanitize(GrammarKind::TolerantPositional, candidate);
        let SanitizedRecord::Receipt(record) = record else { panic!() };
        assert_eq!(record.status, Status::Rejected);
        assert_eq!(record.amount, None);
    }
}
