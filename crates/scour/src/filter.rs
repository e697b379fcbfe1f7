use crate::extract::GrammarKind;

/// Blacklist tokens for raw receipt dumps.
const TOLERANT_BLACKLIST: &[&str] = &[
    "TOTAL", "SUBTOTAL", "TAX", "CASH", "CARD", "DATE:", "TIME:", "CUSTOMER", "ID:", "CASHIER",
];

/// Same list minus "ID:" — that token is the structured grammar's own
/// mandatory field label, so blacklisting it would reject every data line.
const STRUCTURED_BLACKLIST: &[&str] = &[
    "TOTAL", "SUBTOTAL", "TAX", "CASH", "CARD", "DATE:", "TIME:", "CUSTOMER", "CASHIER",
];

/// Cheap blacklist rejection of non-data lines, run before extraction so no
/// pattern work is wasted on totals, headers, and metadata markers.
pub struct NoiseFilter {
    tokens: Vec<String>,
}

impl NoiseFilter {
    /// Build a filter from custom tokens. Matching is case-insensitive
    /// containment.
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_uppercase()).collect(),
        }
    }

    /// The default blacklist for a grammar.
    pub fn for_grammar(kind: GrammarKind) -> Self {
        match kind {
            GrammarKind::StructuredLabeled => Self::new(STRUCTURED_BLACKLIST),
            GrammarKind::TolerantPositional => Self::new(TOLERANT_BLACKLIST),
        }
    }

    /// No side effects, O(blacklist size) per line.
    pub fn is_noise(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.tokens.iter().any(|token| upper.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_are_noise() {
        let filter = NoiseFilter::for_grammar(GrammarKind::TolerantPositional);
        assert!(filter.is_noise("TOTAL: 500.00"));
        assert!(filter.is_noise("SUBTOTAL 123.00"));
        assert!(filter.is_noise("DATE: 2024-06-01"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = NoiseFilter::for_grammar(GrammarKind::TolerantPositional);
        assert!(filter.is_noise("total: 500.00"));
        assert!(filter.is_noise("Cashier on duty"));
    }

    #[test]
    fn test_data_lines_pass() {
        let filter = NoiseFilter::for_grammar(GrammarKind::TolerantPositional);
        assert!(!filter.is_noise("O01234 DUSTY PRODUCT NAME 14.50"));
    }

    #[test]
    fn test_structured_blacklist_keeps_id_label() {
        let structured = NoiseFilter::for_grammar(GrammarKind::StructuredLabeled);
        let line = "ID: O123-AB | PRODUCT: Wat3r Bottle | PRICE: S/ 10.50 | Stock 5";
        assert!(!structured.is_noise(line));
        assert!(structured.is_noise("TOTAL: 500.00"));

        // The tolerant default does blacklist the ID: marker.
        let tolerant = NoiseFilter::for_grammar(GrammarKind::TolerantPositional);
        assert!(tolerant.is_noise(line));
    }

    #[test]
    fn test_custom_tokens() {
        let filter = NoiseFilter::new(&["PAGE"]);
        assert!(filter.is_noise("--- page 3 of 9 ---"));
        assert!(!filter.is_noise("TOTAL: 500.00"));
    }
}
