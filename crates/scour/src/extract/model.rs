use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GrammarKind {
    /// Explicit field labels (ID:, PRODUCT:, PRICE:, Stock) in relative order.
    #[value(alias = "structured")]
    StructuredLabeled,
    /// Leading OCR-tolerant identifier plus trailing decimal amount.
    #[value(alias = "tolerant")]
    TolerantPositional,
}

impl GrammarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarKind::StructuredLabeled => "structured_labeled",
            GrammarKind::TolerantPositional => "tolerant_positional",
        }
    }
}

/// Raw captures from one extraction attempt. Transient: consumed by the
/// sanitizer, never retained across lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub amount: Option<String>,
}
